mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    BatchConfig, FailureKind, FileOutcome, ProcessingStats, ResizeRequest, ResizeStats,
    Result, ResyzeError,
};
pub use processors::{
    BatchProcessor, DiscoveredFile, Discoverer, Encoder, LoadedImage, Loader, MetadataBlob,
    MetadataProcessor, Resizer,
};
pub use utils::{
    derive_directory_output, derive_file_output, ensure_dir, ensure_parent_dir,
    is_supported_format, plan_directory_file, plan_single_file, resolve_output_root,
    RESIZED_SUFFIX, SUPPORTED_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchConfig, BatchProcessor, Discoverer, FileOutcome, ImageProcessor, ResizeRequest,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
