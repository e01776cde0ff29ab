//! Node parameter configuration.
//!
//! The node's declared inputs, loaded from a TOML file. Every key is optional;
//! stock defaults fill the rest. Values are layered:
//!
//! ```text
//! stock defaults  →  config file  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! image = ""                # Image name, resolved by the lookup service
//! width = 512               # Target width (px)
//! height = 512              # Target height (px)
//! resample_mode = "bicubic" # nearest | box | bilinear | hamming | bicubic | lanczos
//! resize_mode = "fit"       # fill | stretch | fit | center | crop
//! is_intermediate = false   # Mark the output as an intermediate image
//! ```
//!
//! Unknown keys and unknown mode names are rejected to catch typos early.

use crate::resize::{ResampleFilter, ResizeStrategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// The node's parameter surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Name of the source image, resolved through the host's lookup service.
    pub image: String,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Interpolation kernel used when scaling.
    pub resample_mode: ResampleFilter,
    /// Placement/crop policy.
    pub resize_mode: ResizeStrategy,
    /// Whether the host should treat the output as an intermediate image.
    pub is_intermediate: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            image: String::new(),
            width: 512,
            height: 512,
            resample_mode: ResampleFilter::default(),
            resize_mode: ResizeStrategy::default(),
            is_intermediate: false,
        }
    }
}

impl NodeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Check that an input image has been named, by file or by flag.
    pub fn require_image(&self) -> Result<&str, ConfigError> {
        if self.image.is_empty() {
            return Err(ConfigError::Validation("no input image given".into()));
        }
        Ok(&self.image)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(NodeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<NodeConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: NodeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the node config: stock defaults, then the file (if any), then `overrides`.
pub fn load_config(
    path: Option<&Path>,
    overrides: Option<toml::Value>,
) -> Result<NodeConfig, ConfigError> {
    let file = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Better Resize Node Configuration
# ================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Command-line flags override values from this file.
# Unknown keys will cause an error.

# Name of the source image. The local CLI resolves it inside --store.
# image = "input.png"

# Target size in pixels. Both must be positive.
width = 512
height = 512

# Interpolation kernel used when scaling:
#   nearest | box | bilinear | hamming | bicubic | lanczos
resample_mode = "bicubic"

# Placement policy:
#   fill    - scale to cover the target, center, clip the overflow
#   stretch - scale to exactly the target, ignoring aspect ratio
#   fit     - scale to fit inside the target (output may be smaller on one axis)
#   center  - scale to fit inside the target, center on a transparent canvas
#   crop    - no scaling, center the original on a transparent canvas
resize_mode = "fit"

# Mark the output as an intermediate image.
is_intermediate = false
"##
}
