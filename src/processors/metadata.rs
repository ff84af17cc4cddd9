// resyze/src/processors/metadata.rs
use crate::core::{ResyzeError, Result};
use image::ImageFormat;
use img_parts::{DynImage, ImageEXIF};
use std::path::Path;

/// Raw EXIF payload lifted from a source container, carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlob(Vec<u8>);

impl MetadataBlob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when the container has no EXIF payload, the payload is
    /// empty, or the format cannot hold one (only JPEG and PNG are understood).
    pub fn capture(
        &self,
        path: &Path,
        format: ImageFormat,
        file_bytes: &[u8],
    ) -> Option<MetadataBlob> {
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
            log::debug!("{:?} source {} carries no EXIF payload", format, path.display());
            return None;
        }

        let container = match DynImage::from_bytes(file_bytes.to_vec().into()) {
            Ok(Some(container)) => container,
            Ok(None) => {
                log::debug!("No metadata container recognised in {}", path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read metadata from {}: {}", path.display(), e);
                return None;
            }
        };

        let blob = container.exif().map(|exif| MetadataBlob(exif.to_vec()))?;
        if blob.is_empty() {
            log::debug!("Empty EXIF payload in {}, ignoring", path.display());
            return None;
        }

        match self.exif_field_count(&blob) {
            Some(count) => log::debug!(
                "Found EXIF data in {} ({} bytes, {} fields)",
                path.display(),
                blob.len(),
                count
            ),
            None => log::debug!(
                "Found unparsable EXIF payload in {} ({} bytes), passing it through",
                path.display(),
                blob.len()
            ),
        }

        Some(blob)
    }

    pub fn can_embed(&self, encoded: &[u8]) -> bool {
        matches!(
            DynImage::from_bytes(encoded.to_vec().into()),
            Ok(Some(_))
        )
    }

    /// Re-wraps freshly encoded image bytes with `blob` as their EXIF payload.
    pub fn embed(&self, path: &Path, encoded: Vec<u8>, blob: &MetadataBlob) -> Result<Vec<u8>> {
        let metadata_error = |reason: String| ResyzeError::Metadata {
            path: path.to_path_buf(),
            reason,
        };

        let mut container = DynImage::from_bytes(encoded.into())
            .map_err(|e| metadata_error(e.to_string()))?
            .ok_or_else(|| metadata_error("output format cannot carry EXIF data".to_string()))?;

        container.set_exif(Some(blob.0.clone().into()));

        let mut output = Vec::new();
        container
            .encoder()
            .write_to(&mut output)
            .map_err(|e| metadata_error(e.to_string()))?;

        Ok(output)
    }

    /// Reads the EXIF payload back out of an encoded image, if any.
    pub fn read_blob(&self, encoded: &[u8]) -> Option<MetadataBlob> {
        DynImage::from_bytes(encoded.to_vec().into())
            .ok()
            .flatten()
            .and_then(|container| container.exif())
            .map(|exif| MetadataBlob(exif.to_vec()))
    }

    fn exif_field_count(&self, blob: &MetadataBlob) -> Option<usize> {
        exif::Reader::new()
            .read_raw(blob.as_bytes().to_vec())
            .ok()
            .map(|exif| exif.fields().count())
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
