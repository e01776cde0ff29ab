//! Shared test utilities: synthetic images and a recording mock host.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let host = MockHost::with_image("source.png", gradient_rgb(100, 50));
//! let output = node.invoke(&host.context("session-1")).unwrap();
//!
//! let ops = host.get_operations();
//! assert_eq!(ops[0], RecordedOp::GetImage("source.png".into()));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::host::{
    ImageCategory, ImageDto, ImageLookup, ImagePersistence, InvocationContext, NewImage,
    ResourceOrigin, ServiceError,
};

// =========================================================================
// Synthetic images
// =========================================================================

/// RGB image where every pixel differs from its neighbours.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * 7 + y * 13) % 256) as u8])
    }))
}

/// Opaque RGBA counterpart of [`gradient_rgb`].
pub fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x * 7 + y * 13) % 256) as u8,
            255,
        ])
    }))
}

/// Single-color RGBA image.
pub fn solid_rgba(width: u32, height: u32, color: Rgba<u8>) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
}

// =========================================================================
// Mock host
// =========================================================================

/// Host services that serve images from memory and record every call.
/// Uses Mutex (not RefCell) so the mock is Sync like a real host service.
#[derive(Default)]
pub struct MockHost {
    images: HashMap<String, DynamicImage>,
    fail_create: bool,
    operations: Mutex<Vec<RecordedOp>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    GetImage(String),
    Create {
        width: u32,
        height: u32,
        origin: ResourceOrigin,
        category: ImageCategory,
        node_id: Option<String>,
        session_id: Option<String>,
        is_intermediate: bool,
        has_workflow: bool,
    },
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(name: &str, image: DynamicImage) -> Self {
        let mut host = Self::new();
        host.images.insert(name.to_string(), image);
        host
    }

    /// Make every `create` call fail with an IO error.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn context(&self, session_id: &str) -> InvocationContext<'_> {
        InvocationContext::new(self, self, session_id)
    }

    pub fn get_operations(&self) -> Vec<RecordedOp> {
        self.operations.lock().unwrap().clone()
    }
}

impl ImageLookup for MockHost {
    fn get_image(&self, image_name: &str) -> Result<DynamicImage, ServiceError> {
        self.operations
            .lock()
            .unwrap()
            .push(RecordedOp::GetImage(image_name.to_string()));

        self.images
            .get(image_name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(image_name.to_string()))
    }
}

impl ImagePersistence for MockHost {
    fn create(&self, new: NewImage) -> Result<ImageDto, ServiceError> {
        let mut ops = self.operations.lock().unwrap();
        ops.push(RecordedOp::Create {
            width: new.image.width(),
            height: new.image.height(),
            origin: new.origin,
            category: new.category,
            node_id: new.node_id.clone(),
            session_id: new.session_id.clone(),
            is_intermediate: new.is_intermediate,
            has_workflow: new.workflow.is_some(),
        });

        if self.fail_create {
            return Err(ServiceError::Io(std::io::Error::other("mock storage offline")));
        }

        let created = ops
            .iter()
            .filter(|op| matches!(op, RecordedOp::Create { .. }))
            .count();
        Ok(ImageDto {
            image_name: format!("output-{created}.png"),
            width: new.image.width(),
            height: new.image.height(),
            origin: new.origin,
            category: new.category,
            node_id: new.node_id,
            session_id: new.session_id,
            is_intermediate: new.is_intermediate,
            has_workflow: new.workflow.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_host_names_outputs_in_order() {
        let host = MockHost::new();
        let new = |w| NewImage {
            image: gradient_rgb(w, 1),
            origin: ResourceOrigin::Internal,
            category: ImageCategory::General,
            node_id: None,
            session_id: None,
            is_intermediate: false,
            workflow: None,
            metadata: None,
        };
        assert_eq!(host.create(new(1)).unwrap().image_name, "output-1.png");
        assert_eq!(host.create(new(2)).unwrap().image_name, "output-2.png");
    }
}
