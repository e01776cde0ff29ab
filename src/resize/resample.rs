//! Resampling through `fast_image_resize`.
//!
//! The filter table is static and closed:
//!
//! | [`ResampleFilter`] | `fast_image_resize` algorithm |
//! |---|---|
//! | `nearest` | `ResizeAlg::Nearest` |
//! | `box` | `Convolution(FilterType::Box)` |
//! | `bilinear` | `Convolution(FilterType::Bilinear)` |
//! | `hamming` | `Convolution(FilterType::Hamming)` |
//! | `bicubic` | `Convolution(FilterType::CatmullRom)` |
//! | `lanczos` | `Convolution(FilterType::Lanczos3)` |
//!
//! Source and destination are both `DynamicImage`s of the same color type, so
//! the output keeps the input's channel layout and bit depth.

use super::calculations::SourceWindow;
use super::engine::ResizeError;
use super::params::ResampleFilter;
use fast_image_resize::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;

impl ResampleFilter {
    /// The resampling algorithm this filter name selects.
    pub fn resize_alg(self) -> ResizeAlg {
        match self {
            Self::Nearest => ResizeAlg::Nearest,
            Self::Box => ResizeAlg::Convolution(FilterType::Box),
            Self::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            Self::Hamming => ResizeAlg::Convolution(FilterType::Hamming),
            Self::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
            Self::Lanczos => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Scale `image` to exactly `width` x `height`.
///
/// Same-size requests return a copy without touching the resampler.
pub fn resample(
    image: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage, ResizeError> {
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let options = ResizeOptions::new().resize_alg(filter.resize_alg());
    run(image, width, height, &options)
}

/// Scale only `window` of `image` to `width` x `height`.
///
/// Pixels outside the window are never resampled or allocated for.
pub fn resample_window(
    image: &DynamicImage,
    window: SourceWindow,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage, ResizeError> {
    let options = ResizeOptions::new().resize_alg(filter.resize_alg()).crop(
        window.left,
        window.top,
        window.width,
        window.height,
    );
    run(image, width, height, &options)
}

fn run(
    image: &DynamicImage,
    width: u32,
    height: u32,
    options: &ResizeOptions,
) -> Result<DynamicImage, ResizeError> {
    let mut dst = DynamicImage::new(width, height, image.color());
    let mut resizer = Resizer::new();
    resizer.resize(image, &mut dst, options)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_rgb, solid_rgba};
    use image::{GenericImageView, Rgb, RgbImage, Rgba};

    #[test]
    fn every_filter_produces_requested_size() {
        let src = gradient_rgb(64, 48);
        for filter in ResampleFilter::ALL {
            let out = resample(&src, 100, 30, filter).unwrap();
            assert_eq!(out.dimensions(), (100, 30), "{filter}");
        }
    }

    #[test]
    fn output_keeps_color_type() {
        let src = gradient_rgb(20, 20);
        let out = resample(&src, 10, 10, ResampleFilter::Lanczos).unwrap();
        assert_eq!(out.color(), src.color());
    }

    #[test]
    fn same_size_is_identity() {
        let src = gradient_rgb(33, 17);
        let out = resample(&src, 33, 17, ResampleFilter::Bicubic).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn solid_color_survives_resampling() {
        let color = Rgba([200, 40, 90, 255]);
        let src = solid_rgba(16, 16, color);
        let out = resample(&src, 8, 8, ResampleFilter::Box).unwrap();
        assert_eq!(out.get_pixel(4, 4), color);
    }

    #[test]
    fn nearest_upscale_duplicates_pixels() {
        let src = gradient_rgb(4, 4);
        let out = resample(&src, 8, 8, ResampleFilter::Nearest).unwrap();
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(0, 0));
        assert_eq!(out.get_pixel(7, 7), src.get_pixel(3, 3));
    }

    #[test]
    fn filters_produce_distinct_output() {
        let src = gradient_rgb(8, 8);
        let outputs: Vec<_> = ResampleFilter::ALL
            .into_iter()
            .map(|filter| (filter, resample(&src, 21, 19, filter).unwrap()))
            .collect();

        for (i, (a, out_a)) in outputs.iter().enumerate() {
            for (b, out_b) in &outputs[i + 1..] {
                // On an upscale a box kernel only ever covers one source pixel.
                let same_on_upscale =
                    matches!((a, b), (ResampleFilter::Nearest, ResampleFilter::Box));
                if same_on_upscale {
                    assert_eq!(out_a, out_b, "{a} vs {b}");
                } else {
                    assert_ne!(out_a, out_b, "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn bicubic_is_catmull_rom() {
        // Step edge upscaled 2x. Output 7 sits 0.75px before the edge, output
        // 8 sits 0.25px after it. Catmull-Rom weights give 0.203 and 0.797 of
        // the step, where a triangle filter would give 0.25 and 0.75.
        let src = DynamicImage::ImageRgb8(RgbImage::from_fn(8, 1, |x, _| {
            if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        }));
        let out = resample(&src, 16, 1, ResampleFilter::Bicubic)
            .unwrap()
            .to_rgb8();

        let before = out.get_pixel(7, 0)[0];
        let after = out.get_pixel(8, 0)[0];
        assert!(before.abs_diff(52) <= 1, "got {before}");
        assert!(after.abs_diff(203) <= 1, "got {after}");
        // Negative lobes ring on both sides of the edge, clamped to range.
        assert_eq!(out.get_pixel(6, 0)[0], 0);
        assert_eq!(out.get_pixel(9, 0)[0], 255);
    }

    #[test]
    fn window_reads_only_the_cropped_region() {
        let src = gradient_rgb(10, 20);
        let window = SourceWindow {
            left: 0.0,
            top: 5.0,
            width: 10.0,
            height: 10.0,
        };
        let out = resample_window(&src, window, 40, 40, ResampleFilter::Nearest).unwrap();

        assert_eq!(out.dimensions(), (40, 40));
        for (x, y) in [(0, 0), (2, 1), (17, 22), (39, 39)] {
            assert_eq!(out.get_pixel(x, y), src.get_pixel(x / 4, 5 + y / 4), "({x}, {y})");
        }
    }

    #[test]
    fn integral_window_at_scale_one_is_a_copy() {
        let src = gradient_rgb(30, 10);
        let window = SourceWindow {
            left: 10.0,
            top: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let out = resample_window(&src, window, 10, 10, ResampleFilter::Lanczos).unwrap();
        assert_eq!(out, src.crop_imm(10, 0, 10, 10));
    }
}
