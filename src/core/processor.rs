// resyze/src/core/processor.rs
use super::{FileOutcome, ResizeRequest, ResizeStats, ResyzeError, Result};
use crate::processors::{Encoder, Loader, MetadataProcessor, Resizer};
use std::panic::{self, AssertUnwindSafe};

/// Resizes one file at a time. Faults never escape `process`; they come back
/// as `FileOutcome::Failed`.
pub struct ImageProcessor {
    loader: Loader,
    resizer: Resizer,
    encoder: Encoder,
    metadata_processor: MetadataProcessor,
}

impl ImageProcessor {
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(),
            encoder: Encoder::new(),
            metadata_processor: MetadataProcessor::new(),
        }
    }

    pub fn process(&self, request: &ResizeRequest) -> FileOutcome {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.process_single(request)));
        let outcome = match attempt {
            Ok(Ok(stats)) => FileOutcome::Resized(stats),
            Ok(Err(error)) => FileOutcome::failed(&request.input_path, error),
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "codec panicked".to_string());
                let error = ResyzeError::Resize {
                    path: request.input_path.clone(),
                    reason,
                };
                FileOutcome::failed(&request.input_path, error)
            }
        };

        log::debug!("{}", outcome);

        outcome
    }

    pub fn process_single(&self, request: &ResizeRequest) -> Result<ResizeStats> {
        let input_path = request.input_path.as_path();
        let output_path = request.output_path.as_path();

        let loaded = self.loader.load(input_path)?;
        let original = loaded.dimensions();

        let metadata = self
            .metadata_processor
            .capture(input_path, loaded.format, &loaded.bytes);

        let resized = self.resizer.resize(&loaded.image, request.scale)?;
        let new_size = (resized.width(), resized.height());

        let metadata_preserved = self
            .encoder
            .save(&resized, output_path, metadata.as_ref())?;

        Ok(ResizeStats {
            input_path: request.input_path.clone(),
            output_path: request.output_path.clone(),
            original,
            resized: new_size,
            metadata_preserved,
        })
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}
