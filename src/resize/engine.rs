//! Strategy dispatch: the resize policy engine.
//!
//! [`resize`] combines the pure geometry from
//! [`calculations`](super::calculations) with [`resample`](super::resample)
//! and canvas compositing. One `match` selects the branch; there is no
//! name-keyed lookup at this level.
//!
//! Canvas-based strategies (`fill`, `center`, `crop`) always return RGBA8 with
//! a fully transparent background. `stretch` and `fit` return the input's own
//! color type.
//!
//! No buffer larger than the target is ever allocated. `fill` resamples only
//! the source window that lands on the canvas, so its scaled intermediate,
//! which can be billions of pixels on one axis, never exists.

use super::calculations::{center_dimensions, center_offset, fill_window, fit_dimensions};
use super::params::{ResampleFilter, ResizeStrategy, TargetSize};
use super::resample::{resample, resample_window};
use image::{DynamicImage, RgbaImage, imageops};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Source image has no pixels ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
    #[error("Target size must be positive, got {0}")]
    EmptyTarget(TargetSize),
    #[error("Resampling failed: {0}")]
    Resample(#[from] fast_image_resize::ResizeError),
}

/// Resize `image` to `target` using the given filter and placement strategy.
///
/// The input is never modified. Zero-sized sources and targets are rejected
/// up front, so no ratio is ever taken over zero.
pub fn resize(
    image: &DynamicImage,
    target: TargetSize,
    filter: ResampleFilter,
    strategy: ResizeStrategy,
) -> Result<DynamicImage, ResizeError> {
    let source = (image.width(), image.height());
    if source.0 == 0 || source.1 == 0 {
        return Err(ResizeError::EmptySource {
            width: source.0,
            height: source.1,
        });
    }
    if target.is_empty() {
        return Err(ResizeError::EmptyTarget(target));
    }
    let canvas = (target.width, target.height);

    let output = match strategy {
        ResizeStrategy::Stretch => resample(image, canvas.0, canvas.1, filter)?,
        ResizeStrategy::Fit => {
            let (w, h) = fit_dimensions(source, canvas);
            resample(image, w, h, filter)?
        }
        ResizeStrategy::Fill => {
            let window = fill_window(source, canvas);
            let covered = resample_window(image, window, canvas.0, canvas.1, filter)?;
            DynamicImage::ImageRgba8(covered.to_rgba8())
        }
        ResizeStrategy::Center => {
            let (w, h) = center_dimensions(source, canvas);
            paste_centered(&resample(image, w, h, filter)?, canvas)
        }
        ResizeStrategy::Crop => paste_centered(image, canvas),
    };

    debug!(
        %strategy,
        %filter,
        source = %TargetSize::new(source.0, source.1),
        %target,
        output = %TargetSize::new(output.width(), output.height()),
        "resized image"
    );
    Ok(output)
}

/// Paste `content` centered onto a fresh transparent RGBA canvas.
///
/// Pixels that fall outside the canvas are clipped. Content without an alpha
/// channel becomes fully opaque.
fn paste_centered(content: &DynamicImage, canvas: (u32, u32)) -> DynamicImage {
    // RgbaImage::new zero-fills, which is transparent black.
    let mut out = RgbaImage::new(canvas.0, canvas.1);
    let (x, y) = center_offset(canvas, (content.width(), content.height()));
    imageops::replace(&mut out, &content.to_rgba8(), x, y);
    DynamicImage::ImageRgba8(out)
}
