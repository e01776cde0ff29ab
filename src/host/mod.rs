//! Collaborator seams supplied by the host orchestration system.
//!
//! The node never owns storage. It resolves its input through an
//! [`ImageLookup`] and hands its output, with provenance, to an
//! [`ImagePersistence`]. Both arrive bundled in an [`InvocationContext`].
//!
//! The host decides what those services are. The crate ships one
//! implementation, [`FsImageStore`], so the CLI can run the node against
//! plain directories.

mod fs_store;

pub use fs_store::FsImageStore;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Invalid image name: {0}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where an image came from, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceOrigin {
    /// Produced by a node during graph execution.
    Internal,
    /// Uploaded or imported by a user.
    External,
}

/// Coarse classification the host uses to group images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    General,
    Mask,
    Control,
    User,
    Other,
}

/// Reference to a stored image, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageField {
    pub image_name: String,
}

impl ImageField {
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
        }
    }
}

/// A freshly produced image plus the provenance the host records with it.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub image: DynamicImage,
    pub origin: ResourceOrigin,
    pub category: ImageCategory,
    pub node_id: Option<String>,
    pub session_id: Option<String>,
    pub is_intermediate: bool,
    /// Opaque workflow descriptor threaded through from the graph.
    pub workflow: Option<serde_json::Value>,
    /// Opaque generation metadata threaded through from the graph.
    pub metadata: Option<serde_json::Value>,
}

/// Descriptor returned by the host after persisting an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDto {
    pub image_name: String,
    pub width: u32,
    pub height: u32,
    pub origin: ResourceOrigin,
    pub category: ImageCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub is_intermediate: bool,
    #[serde(default)]
    pub has_workflow: bool,
}

/// Resolves an image name to pixels.
pub trait ImageLookup {
    fn get_image(&self, image_name: &str) -> Result<DynamicImage, ServiceError>;
}

/// Persists a produced image and returns its descriptor.
pub trait ImagePersistence {
    fn create(&self, image: NewImage) -> Result<ImageDto, ServiceError>;
}

/// Everything the host hands to a node for one invocation.
pub struct InvocationContext<'a> {
    pub images: &'a dyn ImageLookup,
    pub persistence: &'a dyn ImagePersistence,
    /// Identifier of the graph execution this invocation belongs to.
    pub session_id: String,
}

impl<'a> InvocationContext<'a> {
    pub fn new(
        images: &'a dyn ImageLookup,
        persistence: &'a dyn ImagePersistence,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            images,
            persistence,
            session_id: session_id.into(),
        }
    }
}
