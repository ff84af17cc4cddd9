// resyze/src/processors/loader.rs
use crate::core::{ResyzeError, Result};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// A decoded source image together with the raw file bytes it came from.
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl LoadedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<LoadedImage> {
        log::debug!("Loading image from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| ResyzeError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?;

        self.load_from_bytes(path, bytes)
    }

    /// Format is sniffed from content, not from the file extension.
    pub fn load_from_bytes(&self, path: &Path, bytes: Vec<u8>) -> Result<LoadedImage> {
        let decode_error = |source| ResyzeError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| decode_error(image::ImageError::IoError(e)))?;

        let format = reader.format();
        let image = reader.decode().map_err(decode_error)?;
        let format = format.ok_or_else(|| {
            decode_error(image::ImageError::Unsupported(
                image::error::ImageFormatHint::Unknown.into(),
            ))
        })?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Loaded image: {}x{} pixels, format: {:?}, color: {:?}",
            width,
            height,
            format,
            image.color()
        );

        Ok(LoadedImage {
            image,
            format,
            bytes,
        })
    }
}
