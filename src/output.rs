//! CLI output formatting.
//!
//! The primary line names the node; indented context lines show where the
//! pixels came from, what was asked for, and what was stored:
//!
//! ```text
//! better_image_resize cli
//!     Source: photo.jpg
//!     Target: 512x512 (fit, bicubic)
//!     Output: 3f9a0c1e5b7d2a46.png 512x288
//!     Stored: out/3f9a0c1e5b7d2a46.png
//! ```

use crate::node::{BetterResizeInvocation, ImageOutput, TEMPLATE};
use std::path::Path;

/// Lines describing one finished invocation.
pub fn format_invocation(
    node: &BetterResizeInvocation,
    output: &ImageOutput,
    output_dir: &Path,
) -> Vec<String> {
    let mut lines = vec![format!("{} {}", TEMPLATE.node_type, node.id)];
    lines.push(format!("    Source: {}", node.image.image_name));
    lines.push(format!(
        "    Target: {} ({}, {})",
        node.target(),
        node.resize_mode,
        node.resample_mode
    ));
    lines.push(format!(
        "    Output: {} {}x{}",
        output.image.image_name, output.width, output.height
    ));
    lines.push(format!(
        "    Stored: {}",
        output_dir.join(&output.image.image_name).display()
    ));
    lines
}
