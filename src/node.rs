//! The `better_image_resize` node.
//!
//! Wraps [`resize::resize`](crate::resize::resize) in the host's node
//! contract: declared inputs with defaults, a static [`NodeTemplate`], and an
//! [`invoke`](BetterResizeInvocation::invoke) that looks up the source image,
//! resizes it, and persists the result with provenance.
//!
//! ```text
//! image ──► lookup ──► resize(width, height, resample_mode, resize_mode) ──► persist ──► ImageOutput
//! ```
//!
//! Upstream failures (lookup, persistence) are returned unchanged inside
//! [`InvocationError::Upstream`]; nothing is retried.

use crate::config::NodeConfig;
use crate::host::{
    ImageCategory, ImageField, InvocationContext, NewImage, ResourceOrigin, ServiceError,
};
use crate::resize::{self, ParamError, ResampleFilter, ResizeError, ResizeStrategy, TargetSize};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),
    #[error("Resize failed: {0}")]
    Resize(#[from] ResizeError),
    #[error("Upstream service failed: {0}")]
    Upstream(#[from] ServiceError),
}

/// Static declaration of the node, as registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub category: &'static str,
    pub version: &'static str,
    pub inputs: &'static [InputField],
    pub outputs: &'static [OutputField],
}

/// One declared input with its default, as the host's editor shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "no_choices")]
    pub choices: &'static [&'static str],
    pub description: &'static str,
}

fn no_choices(choices: &&[&str]) -> bool {
    choices.is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputField {
    pub name: &'static str,
    pub kind: &'static str,
}

pub const TEMPLATE: NodeTemplate = NodeTemplate {
    node_type: "better_image_resize",
    title: "Better resize Image",
    description: "Resizes an image to specific dimensions",
    tags: &["image", "resize"],
    category: "image",
    version: "1.0.0",
    inputs: &[
        InputField {
            name: "image",
            kind: "ImageField",
            default: None,
            choices: &[],
            description: "Image to be resized",
        },
        InputField {
            name: "width",
            kind: "integer",
            default: Some("512"),
            choices: &[],
            description: "The width to resize to (px)",
        },
        InputField {
            name: "height",
            kind: "integer",
            default: Some("512"),
            choices: &[],
            description: "The height to resize to (px)",
        },
        InputField {
            name: "resample_mode",
            kind: "enum",
            default: Some("bicubic"),
            choices: &ResampleFilter::NAMES,
            description: "The resampling mode",
        },
        InputField {
            name: "resize_mode",
            kind: "enum",
            default: Some("fit"),
            choices: &ResizeStrategy::NAMES,
            description: "The resize mode",
        },
    ],
    outputs: &[
        OutputField {
            name: "image",
            kind: "ImageField",
        },
        OutputField {
            name: "width",
            kind: "integer",
        },
        OutputField {
            name: "height",
            kind: "integer",
        },
    ],
};

/// What the node returns to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOutput {
    pub image: ImageField,
    pub width: u32,
    pub height: u32,
}

/// One configured instance of the node inside a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct BetterResizeInvocation {
    /// Node id assigned by the host.
    pub id: String,
    pub image: ImageField,
    pub width: u32,
    pub height: u32,
    pub resample_mode: ResampleFilter,
    pub resize_mode: ResizeStrategy,
    pub is_intermediate: bool,
    pub workflow: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
}

impl BetterResizeInvocation {
    /// A node with the declared defaults for everything but the image.
    pub fn new(id: impl Into<String>, image: ImageField) -> Self {
        Self {
            id: id.into(),
            image,
            width: 512,
            height: 512,
            resample_mode: ResampleFilter::default(),
            resize_mode: ResizeStrategy::default(),
            is_intermediate: false,
            workflow: None,
            metadata: None,
        }
    }

    /// Build a node from a loaded parameter file.
    pub fn from_config(id: impl Into<String>, config: &NodeConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            resample_mode: config.resample_mode,
            resize_mode: config.resize_mode,
            is_intermediate: config.is_intermediate,
            ..Self::new(id, ImageField::new(config.image.clone()))
        }
    }

    /// Set both modes from raw input names, as a host passes them through.
    pub fn with_modes(
        mut self,
        resample_mode: &str,
        resize_mode: &str,
    ) -> Result<Self, InvocationError> {
        self.resample_mode = resample_mode.parse()?;
        self.resize_mode = resize_mode.parse()?;
        Ok(self)
    }

    pub fn target(&self) -> TargetSize {
        TargetSize::new(self.width, self.height)
    }

    pub fn invoke(&self, context: &InvocationContext<'_>) -> Result<ImageOutput, InvocationError> {
        let source = context.images.get_image(&self.image.image_name)?;
        info!(
            node = %self.id,
            image = %self.image.image_name,
            target = %self.target(),
            resample_mode = %self.resample_mode,
            resize_mode = %self.resize_mode,
            "invoking better_image_resize"
        );

        let resized = resize::resize(&source, self.target(), self.resample_mode, self.resize_mode)?;

        let dto = context.persistence.create(NewImage {
            image: resized,
            origin: ResourceOrigin::Internal,
            category: ImageCategory::General,
            node_id: Some(self.id.clone()),
            session_id: Some(context.session_id.clone()),
            is_intermediate: self.is_intermediate,
            workflow: self.workflow.clone(),
            metadata: self.metadata.clone(),
        })?;
        info!(image = %dto.image_name, width = dto.width, height = dto.height, "persisted output");

        Ok(ImageOutput {
            image: ImageField::new(dto.image_name),
            width: dto.width,
            height: dto.height,
        })
    }
}
