//! The resize policy engine.
//!
//! | Strategy | Scaling | Output size |
//! |---|---|---|
//! | **stretch** | straight to the target, aspect ignored | target |
//! | **fit** | inside the target, aspect kept | derived, ≤ target |
//! | **fill** | cover the target, aspect kept, centered and clipped | target |
//! | **center** | inside the target, aspect kept, centered on transparent | target |
//! | **crop** | none, original centered and clipped or padded | target |
//!
//! The module is split into:
//! - **Parameters**: [`ResampleFilter`], [`ResizeStrategy`], [`TargetSize`]
//! - **Calculations**: Pure functions for dimension and offset math (unit testable)
//! - **Resample**: The filter table and the `fast_image_resize` call
//! - **Engine**: [`resize`], dispatching on the strategy

pub mod calculations;
mod engine;
mod params;
mod resample;

pub use engine::{ResizeError, resize};
pub use params::{ParamError, ResampleFilter, ResizeStrategy, TargetSize};
