// resyze/src/processors/resizer.rs
use crate::core::{ResyzeError, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

pub const MAX_DIMENSION: u32 = 100_000;

/// Upper bound on the output buffer plus the f32 intermediate used by resampling.
pub const MAX_RESIZE_BYTES: u64 = 4 * 1024 * 1024 * 1024;

// Rgba<f32> intermediate pixel.
const INTERMEDIATE_BYTES_PER_PIXEL: u64 = 16;

/// Uniform scaling with a Lanczos3 kernel.
pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Truncates toward zero, so 101px at 0.5 becomes 50px.
    pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
        let scale_axis = |length: u32| (f64::from(length) * scale).floor() as u32;
        (scale_axis(width), scale_axis(height))
    }

    pub fn resize(&self, image: &DynamicImage, scale: f64) -> Result<DynamicImage> {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = Self::scaled_dimensions(orig_width, orig_height, scale);

        if width == 0 || height == 0 {
            return Err(ResyzeError::ZeroDimension { width, height });
        }

        Self::check_budget(image, width, height)?;

        if width == orig_width && height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return Ok(image.clone());
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            width,
            height
        );

        Ok(image.resize_exact(width, height, self.filter))
    }

    /// Oversized targets are refused up front; an allocation failure would abort the process.
    fn check_budget(image: &DynamicImage, width: u32, height: u32) -> Result<()> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ResyzeError::DimensionsTooLarge {
                width,
                height,
                limit: format!("{} pixels per side", MAX_DIMENSION),
            });
        }

        // Vertical pass first: source width x target height in f32, then the target itself.
        let bytes_per_pixel = u64::from(image.color().bytes_per_pixel());
        let required = u64::from(image.width())
            .checked_mul(u64::from(height))
            .and_then(|pixels| pixels.checked_mul(INTERMEDIATE_BYTES_PER_PIXEL))
            .and_then(|intermediate| {
                u64::from(width)
                    .checked_mul(u64::from(height))
                    .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
                    .and_then(|output| output.checked_add(intermediate))
            });

        match required {
            Some(bytes) if bytes <= MAX_RESIZE_BYTES => Ok(()),
            _ => Err(ResyzeError::DimensionsTooLarge {
                width,
                height,
                limit: format!("{} MiB memory", MAX_RESIZE_BYTES / (1024 * 1024)),
            }),
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions_truncate() {
        assert_eq!(Resizer::scaled_dimensions(101, 50, 0.5), (50, 25));
        assert_eq!(Resizer::scaled_dimensions(99, 99, 0.333), (32, 32));
        assert_eq!(Resizer::scaled_dimensions(10, 10, 2.5), (25, 25));
    }

    #[test]
    fn test_scaled_dimensions_can_reach_zero() {
        assert_eq!(Resizer::scaled_dimensions(3, 200, 0.1), (0, 20));
    }

    #[test]
    fn test_resize_applies_exact_dimensions() {
        let image = DynamicImage::new_rgb8(101, 50);
        let resized = Resizer::new().resize(&image, 0.5).unwrap();
        assert_eq!(resized.dimensions(), (50, 25));
    }

    #[test]
    fn test_resize_enlarges() {
        let image = DynamicImage::new_rgba8(4, 6);
        let resized = Resizer::new().resize(&image, 1.5).unwrap();
        assert_eq!(resized.dimensions(), (6, 9));
    }

    #[test]
    fn test_resize_rejects_zero_dimension() {
        let image = DynamicImage::new_rgb8(1, 40);
        let result = Resizer::new().resize(&image, 0.5);
        assert!(matches!(
            result,
            Err(ResyzeError::ZeroDimension { width: 0, height: 20 })
        ));
    }

    #[test]
    fn test_resize_rejects_side_over_limit() {
        let image = DynamicImage::new_rgb8(100, 100);
        let result = Resizer::new().resize(&image, 100_000.0);
        assert!(matches!(
            result,
            Err(ResyzeError::DimensionsTooLarge {
                width: 10_000_000,
                height: 10_000_000,
                ..
            })
        ));
    }

    #[test]
    fn test_resize_rejects_memory_budget_overrun() {
        // 90,000 x 90,000 stays under the per-side limit but needs far more than the budget.
        let image = DynamicImage::new_rgba8(100, 100);
        let result = Resizer::new().resize(&image, 900.0);
        assert!(matches!(
            result,
            Err(ResyzeError::DimensionsTooLarge { width: 90_000, height: 90_000, .. })
        ));
    }

    #[test]
    fn test_resize_budget_allows_moderate_enlargement() {
        let image = DynamicImage::new_rgb8(10, 10);
        assert!(Resizer::check_budget(&image, 4_000, 4_000).is_ok());
    }

    #[test]
    fn test_resize_uses_lanczos() {
        assert_eq!(Resizer::new().filter, FilterType::Lanczos3);
    }
}
