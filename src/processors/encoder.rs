// resyze/src/processors/encoder.rs
use crate::core::{ResyzeError, Result};
use crate::processors::metadata::{MetadataBlob, MetadataProcessor};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Writes resized images, choosing the codec from the output extension.
pub struct Encoder {
    metadata_processor: MetadataProcessor,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            metadata_processor: MetadataProcessor::new(),
        }
    }

    /// Returns whether `metadata` ended up in the written file.
    pub fn save(
        &self,
        image: &DynamicImage,
        path: &Path,
        metadata: Option<&MetadataBlob>,
    ) -> Result<bool> {
        let format = ImageFormat::from_path(path).map_err(|source| ResyzeError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Saving image to {} with format {:?}", path.display(), format);

        let mut encoded = self.encode_to_bytes(image, path, format)?;
        let mut preserved = false;

        if let Some(blob) = metadata {
            if self.metadata_processor.can_embed(&encoded) {
                encoded = self.metadata_processor.embed(path, encoded, blob)?;
                preserved = true;
            } else {
                log::warn!(
                    "{:?} output cannot carry EXIF data, dropping {} bytes of metadata for {}",
                    format,
                    blob.len(),
                    path.display()
                );
            }
        }

        std::fs::write(path, &encoded).map_err(|e| ResyzeError::Encode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?;

        log::debug!("Saved image: {} ({} bytes)", path.display(), encoded.len());
        Ok(preserved)
    }

    pub fn encode_to_bytes(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        // JPEG has no alpha channel and only 8-bit samples.
        let jpeg_compatible = matches!(
            image,
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_)
        );

        let result = if format == ImageFormat::Jpeg && !jpeg_compatible {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buffer, format)
        } else {
            image.write_to(&mut buffer, format)
        };

        result.map_err(|source| ResyzeError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(buffer.into_inner())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use tempfile::tempdir;

    #[test]
    fn test_save_picks_format_from_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.PNG");

        let preserved = Encoder::new()
            .save(&DynamicImage::new_rgb8(5, 4), &path, None)
            .unwrap();

        assert!(!preserved);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_save_unknown_extension_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.unknown");

        let result = Encoder::new().save(&DynamicImage::new_rgb8(2, 2), &path, None);

        assert!(matches!(result, Err(ResyzeError::Encode { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let bytes = Encoder::new()
            .encode_to_bytes(
                &DynamicImage::new_rgba8(3, 3),
                Path::new("out.jpg"),
                ImageFormat::Jpeg,
            )
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 3));
    }

    #[test]
    fn test_save_embeds_metadata_into_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let blob = MetadataBlob::new(b"opaque".to_vec());

        let preserved = Encoder::new()
            .save(&DynamicImage::new_rgb8(2, 2), &path, Some(&blob))
            .unwrap();

        assert!(preserved);
        let written = std::fs::read(&path).unwrap();
        assert_eq!(MetadataProcessor::new().read_blob(&written), Some(blob));
    }

    #[test]
    fn test_save_drops_metadata_for_bmp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        let blob = MetadataBlob::new(b"opaque".to_vec());

        let preserved = Encoder::new()
            .save(&DynamicImage::new_rgb8(2, 2), &path, Some(&blob))
            .unwrap();

        assert!(!preserved);
        assert!(path.exists());
    }
}
