// resyze/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{BatchConfig, FileOutcome, ProcessingStats, ResizeRequest, ResyzeError, Result};
use crate::processors::discovery::{DiscoveredFile, Discoverer};
use crate::utils::{
    ensure_dir, ensure_parent_dir, plan_directory_file, plan_single_file, resolve_output_root,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

type OutcomeReporter = Box<dyn Fn(&FileOutcome) + Send + Sync>;

/// Top-level driver: one file, or every candidate under a directory.
pub struct BatchProcessor {
    config: BatchConfig,
    processor: ImageProcessor,
    thread_pool: Option<rayon::ThreadPool>,
    reporter: Option<OutcomeReporter>,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;

        // 0 falls back to rayon's global pool, 1 stays on the calling thread.
        let thread_pool = if config.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| {
                    ResyzeError::InvalidParameter(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            config,
            processor: ImageProcessor::new(),
            thread_pool,
            reporter: None,
        })
    }

    /// Called once per file as soon as its outcome is known.
    pub fn with_reporter(
        mut self,
        reporter: impl Fn(&FileOutcome) + Send + Sync + 'static,
    ) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Only an invalid input path or an unusable output root ends the run early.
    pub fn run(&self) -> Result<ProcessingStats> {
        let input = self.config.input_root.as_path();

        if input.is_file() {
            Ok(self.process_file(input))
        } else if input.is_dir() {
            self.process_directory(input)
        } else {
            Err(ResyzeError::InvalidInput(input.to_path_buf()))
        }
    }

    pub fn process_file(&self, input_path: &Path) -> ProcessingStats {
        let output_path = plan_single_file(input_path, self.config.output_root.as_deref());
        let mut stats = ProcessingStats::default();
        stats.record(self.resize_one(input_path, output_path));
        stats
    }

    pub fn process_directory(&self, input_root: &Path) -> Result<ProcessingStats> {
        let output_root = resolve_output_root(input_root, self.config.output_root.as_deref());
        ensure_dir(&output_root)?;

        let discoverer =
            Discoverer::new(input_root, self.config.recursive).excluding(&output_root);

        log::info!(
            "Resizing images from {} into {} (scale {}, recursive: {})",
            input_root.display(),
            output_root.display(),
            self.config.scale,
            self.config.recursive
        );

        let mut stats = ProcessingStats::default();

        if self.config.threads == 1 {
            for file in discoverer.iter() {
                stats.record(self.resize_discovered(&output_root, &file));
            }
        } else {
            let files: Vec<DiscoveredFile> = discoverer.iter().collect();
            let resize_all = || -> Vec<FileOutcome> {
                files
                    .par_iter()
                    .map(|file| self.resize_discovered(&output_root, file))
                    .collect()
            };

            let outcomes = match &self.thread_pool {
                Some(pool) => pool.install(resize_all),
                None => resize_all(),
            };
            for outcome in outcomes {
                stats.record(outcome);
            }
        }

        if stats.attempted_count() == 0 {
            log::warn!("No image files found in {}", input_root.display());
        }

        Ok(stats)
    }

    fn resize_discovered(&self, output_root: &Path, file: &DiscoveredFile) -> FileOutcome {
        let output_path = plan_directory_file(output_root, &file.relative_path);
        self.resize_one(&file.path, output_path)
    }

    fn resize_one(&self, input_path: &Path, output_path: PathBuf) -> FileOutcome {
        let outcome = match ensure_parent_dir(&output_path) {
            Ok(()) => self.processor.process(&ResizeRequest::new(
                input_path,
                output_path,
                self.config.scale,
            )),
            Err(error) => FileOutcome::failed(input_path, error),
        };

        if let Some(reporter) = &self.reporter {
            reporter(&outcome);
        }

        outcome
    }
}
