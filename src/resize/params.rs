//! Parameter types for resize operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the configuration surface (TOML, CLI flags, the host's
//! node inputs) and the [`engine`](super::engine), which does the pixel work.
//!
//! ## Types
//!
//! - [`ResampleFilter`]: Interpolation kernel used when scaling (default `bicubic`).
//! - [`ResizeStrategy`]: Placement/crop policy (default `fit`).
//! - [`TargetSize`]: Requested output width and height.
//!
//! Both enumerations are closed: names are parsed once at the edge and an
//! unknown name is a [`ParamError`], never a silent fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Unknown resample mode '{0}' (expected one of: {list})", list = ResampleFilter::NAMES.join(", "))]
    UnknownFilter(String),
    #[error("Unknown resize mode '{0}' (expected one of: {list})", list = ResizeStrategy::NAMES.join(", "))]
    UnknownStrategy(String),
}

/// Interpolation kernel used when changing the sampling resolution.
///
/// | Name | Kernel |
/// |---|---|
/// | `nearest` | nearest neighbour |
/// | `box` | box convolution |
/// | `bilinear` | triangle convolution |
/// | `hamming` | Hamming-windowed convolution |
/// | `bicubic` | Catmull-Rom cubic convolution |
/// | `lanczos` | Lanczos-3 convolution |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResampleFilter {
    Nearest,
    Box,
    Bilinear,
    Hamming,
    #[default]
    Bicubic,
    Lanczos,
}

impl ResampleFilter {
    pub const ALL: [ResampleFilter; 6] = [
        Self::Nearest,
        Self::Box,
        Self::Bilinear,
        Self::Hamming,
        Self::Bicubic,
        Self::Lanczos,
    ];

    pub const NAMES: [&'static str; 6] =
        ["nearest", "box", "bilinear", "hamming", "bicubic", "lanczos"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Box => "box",
            Self::Bilinear => "bilinear",
            Self::Hamming => "hamming",
            Self::Bicubic => "bicubic",
            Self::Lanczos => "lanczos",
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleFilter {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ParamError::UnknownFilter(s.to_string()))
    }
}

impl TryFrom<String> for ResampleFilter {
    type Error = ParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Placement/crop policy applied when the source and target sizes differ.
///
/// - `fill`: scale to cover the target, center, clip the overflow
/// - `stretch`: scale to exactly the target, ignoring aspect ratio
/// - `fit`: scale to fit inside the target; output shrinks on one axis
/// - `center`: scale to fit inside the target, center on a transparent canvas
/// - `crop`: no scaling, center the original on a transparent canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResizeStrategy {
    Fill,
    Stretch,
    #[default]
    Fit,
    Center,
    Crop,
}

impl ResizeStrategy {
    pub const ALL: [ResizeStrategy; 5] = [
        Self::Fill,
        Self::Stretch,
        Self::Fit,
        Self::Center,
        Self::Crop,
    ];

    pub const NAMES: [&'static str; 5] = ["fill", "stretch", "fit", "center", "crop"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stretch => "stretch",
            Self::Fit => "fit",
            Self::Center => "center",
            Self::Crop => "crop",
        }
    }

    /// Whether the output is always exactly the target size.
    ///
    /// Only `fit` derives its own output size.
    pub fn keeps_target_size(self) -> bool {
        !matches!(self, Self::Fit)
    }
}

impl fmt::Display for ResizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeStrategy {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ParamError::UnknownStrategy(s.to_string()))
    }
}

impl TryFrom<String> for ResizeStrategy {
    type Error = ParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Requested output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
