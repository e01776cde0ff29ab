//! Directory-backed host services for running the node outside a graph.
//!
//! Inputs are read from `source_dir` by file name. Outputs are encoded as PNG
//! and written to `output_dir`, named by the SHA-256 of the encoded bytes, with
//! a `<name>.json` sidecar holding the descriptor, workflow and metadata:
//!
//! ```text
//! output/
//! ├── 3f9a0c1e5b7d2a46.png
//! └── 3f9a0c1e5b7d2a46.png.json
//! ```
//!
//! Writing the same pixels twice yields the same name, so repeated runs
//! overwrite rather than accumulate.

use super::{ImageDto, ImageLookup, ImagePersistence, NewImage, ServiceError};
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Length of the hex digest prefix used for output names.
const NAME_HASH_LEN: usize = 16;

pub struct FsImageStore {
    source_dir: PathBuf,
    output_dir: PathBuf,
}

/// On-disk sidecar written next to every persisted image.
#[derive(Serialize)]
struct Sidecar<'a> {
    #[serde(flatten)]
    dto: &'a ImageDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a serde_json::Value>,
}

impl FsImageStore {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolve an image name inside the source directory.
    ///
    /// Names are plain relative paths; anything that could escape the
    /// directory (`..`, absolute paths, drive prefixes) is rejected.
    fn source_path(&self, image_name: &str) -> Result<PathBuf, ServiceError> {
        let name = Path::new(image_name);
        let is_plain = !image_name.is_empty()
            && name
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(ServiceError::InvalidName(image_name.to_string()));
        }
        Ok(self.source_dir.join(name))
    }
}

/// Content-addressed file name for encoded image bytes.
fn output_name(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    format!("{}.png", &digest[..NAME_HASH_LEN])
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ServiceError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

impl ImageLookup for FsImageStore {
    fn get_image(&self, image_name: &str) -> Result<DynamicImage, ServiceError> {
        let path = self.source_path(image_name)?;
        if !path.is_file() {
            return Err(ServiceError::NotFound(image_name.to_string()));
        }
        debug!(path = %path.display(), "loading image");
        Ok(ImageReader::open(&path)?.with_guessed_format()?.decode()?)
    }
}

impl ImagePersistence for FsImageStore {
    fn create(&self, new: NewImage) -> Result<ImageDto, ServiceError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let bytes = encode_png(&new.image)?;
        let image_name = output_name(&bytes);
        let path = self.output_dir.join(&image_name);
        std::fs::write(&path, &bytes)?;

        let dto = ImageDto {
            image_name,
            width: new.image.width(),
            height: new.image.height(),
            origin: new.origin,
            category: new.category,
            node_id: new.node_id,
            session_id: new.session_id,
            is_intermediate: new.is_intermediate,
            has_workflow: new.workflow.is_some(),
        };

        let sidecar = Sidecar {
            dto: &dto,
            workflow: new.workflow.as_ref(),
            metadata: new.metadata.as_ref(),
        };
        let mut sidecar_path = path.into_os_string();
        sidecar_path.push(".json");
        std::fs::write(&sidecar_path, serde_json::to_string_pretty(&sidecar)?)?;

        debug!(image_name = %dto.image_name, "stored image");
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ImageCategory, ResourceOrigin};
    use crate::test_helpers::gradient_rgba;
    use tempfile::TempDir;

    fn new_image(image: DynamicImage) -> NewImage {
        NewImage {
            image,
            origin: ResourceOrigin::Internal,
            category: ImageCategory::General,
            node_id: Some("node-1".into()),
            session_id: Some("session-1".into()),
            is_intermediate: true,
            workflow: Some(serde_json::json!({"nodes": []})),
            metadata: None,
        }
    }

    #[test]
    fn create_then_lookup_round_trips_pixels() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path(), tmp.path());
        let image = gradient_rgba(12, 7);

        let dto = store.create(new_image(image.clone())).unwrap();
        assert_eq!((dto.width, dto.height), (12, 7));
        assert!(dto.image_name.ends_with(".png"));

        let loaded = store.get_image(&dto.image_name).unwrap();
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn identical_pixels_get_identical_names() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path(), tmp.path());

        let a = store.create(new_image(gradient_rgba(5, 5))).unwrap();
        let b = store.create(new_image(gradient_rgba(5, 5))).unwrap();
        assert_eq!(a.image_name, b.image_name);
        assert_eq!(a.image_name.len(), NAME_HASH_LEN + ".png".len());
    }

    #[test]
    fn sidecar_records_provenance() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path(), tmp.path().join("out"));

        let dto = store.create(new_image(gradient_rgba(3, 3))).unwrap();
        let sidecar_path = tmp.path().join("out").join(format!("{}.json", dto.image_name));
        let sidecar: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(sidecar_path).unwrap()).unwrap();

        assert_eq!(sidecar["node_id"], "node-1");
        assert_eq!(sidecar["session_id"], "session-1");
        assert_eq!(sidecar["origin"], "internal");
        assert_eq!(sidecar["is_intermediate"], true);
        assert_eq!(sidecar["has_workflow"], true);
        assert_eq!(sidecar["workflow"], serde_json::json!({"nodes": []}));
        assert!(sidecar.get("metadata").is_none());
    }

    #[test]
    fn missing_image_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path(), tmp.path());
        let err = store.get_image("nope.png").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref n) if n == "nope.png"));
    }

    #[test]
    fn escaping_names_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path(), tmp.path());
        for name in ["../secret.png", "/etc/passwd", ""] {
            let err = store.get_image(name).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidName(_)), "{name}");
        }
    }
}
