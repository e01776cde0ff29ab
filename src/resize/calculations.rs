//! Pure calculation functions for resize geometry.
//!
//! All functions here are pure and testable without any pixels. Every size
//! is `(width, height)`; callers guarantee that no component is zero.
//!
//! Ratios are compared and applied with exact integer arithmetic rather than
//! floats, so `floor(oh * tw / ow)` is the true floor and an axis that should
//! match the target exactly always does.

/// `floor(value * num / den)`, clamped to at least one pixel.
///
/// The product of two `u32`s always fits in a `u64`, and so does the quotient.
fn scale_axis(value: u32, num: u32, den: u32) -> u64 {
    debug_assert!(den > 0, "scale_axis called with zero denominator");
    (u64::from(value) * u64::from(num) / u64::from(den)).max(1)
}

/// [`scale_axis`] for a result known to be at most `bound`.
fn scale_within(value: u32, num: u32, den: u32, bound: u32) -> u32 {
    // min() is a no-op for callers that uphold the bound; it makes the cast lossless.
    scale_axis(value, num, den).min(u64::from(bound)) as u32
}

/// Output size for the `fit` strategy.
///
/// With `r = ow / oh`: if `tw / th < r` the width is bound (`(tw, floor(tw / r))`),
/// otherwise the height is bound (`(floor(th * r), th)`).
///
/// The derived axis never drops below one pixel: for extreme ratios (a
/// 10000x1 strip into 10x10) the result is `(tw, 1)` or `(1, th)` rather than
/// an empty image.
///
/// # Examples
/// ```
/// # use better_resize::resize::calculations::fit_dimensions;
/// // 100x50 into 200x200 → width-bound, ratio 2 preserved
/// assert_eq!(fit_dimensions((100, 50), (200, 200)), (200, 100));
/// ```
pub fn fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (ow, oh) = source;
    let (tw, th) = target;

    // tw / th < ow / oh  ⇔  tw * oh < ow * th
    if u64::from(tw) * u64::from(oh) < u64::from(ow) * u64::from(th) {
        (tw, scale_within(tw, oh, ow, th))
    } else {
        (scale_within(th, ow, oh, tw), th)
    }
}

/// Scaled size for the `fill` strategy: `max(tw / ow, th / oh)` applied to both axes.
///
/// The result covers the target on both axes; one axis matches exactly, the
/// other may overflow. The overflowing axis can be far larger than any image
/// worth allocating (1x3000 into 3000x1 scales to 3000x9000000), which is why
/// it is `u64` and only ever used through [`fill_window`].
pub fn fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u64, u64) {
    let (ow, oh) = source;
    let (tw, th) = target;

    // tw / ow >= th / oh  ⇔  tw * oh >= th * ow
    if u64::from(tw) * u64::from(oh) >= u64::from(th) * u64::from(ow) {
        (u64::from(tw), scale_axis(oh, tw, ow))
    } else {
        (scale_axis(ow, th, oh), u64::from(th))
    }
}

/// Region of the source, in source pixels, that a resampler must read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceWindow {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The part of the source that survives `fill`.
///
/// Scaling to [`fill_dimensions`] and then pasting at [`center_offset`]
/// clips the scaled image to the canvas. This maps the visible canvas back
/// onto the source, so resampling just this window straight into a
/// target-sized buffer gives the same picture without the scaled
/// intermediate.
pub fn fill_window(source: (u32, u32), target: (u32, u32)) -> SourceWindow {
    let (sw, sh) = fill_dimensions(source, target);
    let (left, width) = window_axis(source.0, target.0, sw);
    let (top, height) = window_axis(source.1, target.1, sh);
    SourceWindow {
        left,
        top,
        width,
        height,
    }
}

/// Start and length on one source axis of length `o`, scaled to `s`, shown on `t`.
fn window_axis(o: u32, t: u32, s: u64) -> (f64, f64) {
    if s <= u64::from(t) {
        return (0.0, f64::from(o));
    }
    // center_offset floors toward -inf, so the clipped lead is the ceiling
    let skip = (s - u64::from(t)).div_ceil(2);
    let (o, s) = (f64::from(o), s as f64);
    let start = skip as f64 * o / s;
    let len = (f64::from(t) * o / s).min(o - start);
    (start, len)
}

/// Scaled size for the `center` strategy: `min(tw / ow, th / oh)` applied to both axes.
///
/// The result fits entirely inside the target; one axis matches exactly.
pub fn center_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (ow, oh) = source;
    let (tw, th) = target;

    if u64::from(tw) * u64::from(oh) <= u64::from(th) * u64::from(ow) {
        (tw, scale_within(oh, tw, ow, th))
    } else {
        (scale_within(ow, th, oh, tw), th)
    }
}

/// Top-left offset that centers `content` on `canvas`.
///
/// Floor division on both axes: an odd leftover puts the extra pixel on the
/// bottom/right, and content larger than the canvas gets a negative offset
/// (rounded toward negative infinity).
pub fn center_offset(canvas: (u32, u32), content: (u32, u32)) -> (i64, i64) {
    let dx = i64::from(canvas.0) - i64::from(content.0);
    let dy = i64::from(canvas.1) - i64::from(content.1);
    (dx.div_euclid(2), dy.div_euclid(2))
}
