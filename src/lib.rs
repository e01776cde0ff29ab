//! # Better Resize
//!
//! An image resize node for a node-graph image-generation pipeline. Given an
//! image and a target size it produces a resized image using one of five
//! placement strategies and one of six resampling filters.
//!
//! # Architecture
//!
//! The node is one pure computation wrapped in the host's plugin contract:
//!
//! ```text
//! host lookup ──► resize::resize(image, target, filter, strategy) ──► host persistence
//! ```
//!
//! The host (graph scheduler, image store, provenance records) is not part of
//! this crate. It is reached only through the traits in [`host`], so the node
//! runs the same against a real host, the directory-backed
//! [`host::FsImageStore`] used by the CLI, or a mock in tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resize`] | The resize policy engine: strategies, filters, geometry, compositing |
//! | [`node`] | The `better_image_resize` node: template, inputs, `invoke` |
//! | [`host`] | Lookup/persistence traits, provenance types, local directory store |
//! | [`config`] | Node parameters from TOML, layered over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Closed Enumerations
//!
//! Strategies and filters are enums dispatched with a single `match`. Names
//! are parsed once, at the config/CLI edge, and an unknown name is an error
//! there. Nothing downstream can see a typo.
//!
//! ## Exact Integer Geometry
//!
//! Scaled sizes are `floor(a * b / c)` computed in 64-bit integers. A ratio
//! that should land exactly on the target axis always does, which keeps the
//! `fill` strategy from leaving a one-pixel transparent seam.
//!
//! ## Fail Loudly on Degenerate Sizes
//!
//! Zero-sized sources and targets are rejected before any ratio is taken.
//! Everything else (oversized content, negative centering offsets) is
//! handled by clipping.

pub mod config;
pub mod host;
pub mod node;
pub mod output;
pub mod resize;

#[cfg(test)]
pub(crate) mod test_helpers;
