// resyze/src/core/mod.rs
pub mod processor;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Immutable settings for one run, built once from the command line.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_root: PathBuf,
    pub output_root: Option<PathBuf>,
    pub scale: f64,
    pub recursive: bool,
    /// 1 = sequential, 0 = one worker per CPU.
    pub threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::new(),
            output_root: None,
            scale: 0.5,
            recursive: false,
            threads: 1,
        }
    }
}

impl BatchConfig {
    pub fn new(input_root: impl Into<PathBuf>, scale: f64) -> Self {
        Self {
            input_root: input_root.into(),
            scale,
            ..Default::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output.into());
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ResyzeError::InvalidParameter(format!(
                "Scale factor must be a positive number, got {}",
                self.scale
            )));
        }

        Ok(())
    }
}

/// One unit of work for the resize worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub scale: f64,
}

impl ResizeRequest {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, scale: f64) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeStats {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original: (u32, u32),
    pub resized: (u32, u32),
    pub metadata_preserved: bool,
}

#[derive(Debug)]
pub enum FileOutcome {
    Resized(ResizeStats),
    Failed { input_path: PathBuf, error: ResyzeError },
}

impl FileOutcome {
    pub fn failed(input_path: impl Into<PathBuf>, error: ResyzeError) -> Self {
        Self::Failed {
            input_path: input_path.into(),
            error,
        }
    }

    pub fn input_path(&self) -> &Path {
        match self {
            Self::Resized(stats) => &stats.input_path,
            Self::Failed { input_path, .. } => input_path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Resized(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Resized(_) => None,
            Self::Failed { error, .. } => Some(error.kind()),
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resized(stats) => write!(
                f,
                "Successfully resized {} from {}x{} to {}x{}",
                stats.input_path.display(),
                stats.original.0,
                stats.original.1,
                stats.resized.0,
                stats.resized.1
            ),
            Self::Failed { input_path, error } => {
                write!(f, "Error resizing {}: {}", input_path.display(), error)
            }
        }
    }
}

/// Aggregated outcomes of a run.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub resized: Vec<ResizeStats>,
    pub failures: Vec<(PathBuf, ResyzeError)>,
}

impl ProcessingStats {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Resized(stats) => self.resized.push(stats),
            FileOutcome::Failed { input_path, error } => self.failures.push((input_path, error)),
        }
    }

    pub fn processed_count(&self) -> usize {
        self.resized.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn attempted_count(&self) -> usize {
        self.resized.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Per-file failure taxonomy reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    DirectoryCreation,
    Decode,
    Resize,
    Encode,
}

#[derive(Error, Debug)]
pub enum ResyzeError {
    #[error("{0} is not a valid file or directory")]
    InvalidInput(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Scaled size {width}x{height} has a zero dimension")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Scaled size {width}x{height} exceeds the {limit} limit")]
    DimensionsTooLarge {
        width: u32,
        height: u32,
        limit: String,
    },

    #[error("Resize failed: {reason}")]
    Resize { path: PathBuf, reason: String },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to attach metadata to {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },
}

impl ResyzeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput(_) | Self::InvalidParameter(_) => FailureKind::InvalidInput,
            Self::DirectoryCreation { .. } => FailureKind::DirectoryCreation,
            Self::Decode { .. } => FailureKind::Decode,
            Self::ZeroDimension { .. }
            | Self::DimensionsTooLarge { .. }
            | Self::Resize { .. } => FailureKind::Resize,
            Self::Encode { .. } | Self::Metadata { .. } => FailureKind::Encode,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_half_scale_sequential() {
        let config = BatchConfig::default();
        assert_eq!(config.scale, 0.5);
        assert_eq!(config.threads, 1);
        assert!(!config.recursive);
        assert!(config.output_root.is_none());
    }

    #[test]
    fn test_validate_rejects_non_positive_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = BatchConfig::new("photos", scale);
            assert!(matches!(
                config.validate(),
                Err(ResyzeError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_validate_allows_enlarging() {
        assert!(BatchConfig::new("photos", 3.0).validate().is_ok());
        assert!(BatchConfig::new("photos", 0.001).validate().is_ok());
    }

    #[test]
    fn test_outcome_messages() {
        let ok = FileOutcome::Resized(ResizeStats {
            input_path: PathBuf::from("a.png"),
            output_path: PathBuf::from("a_resized.png"),
            original: (101, 50),
            resized: (50, 25),
            metadata_preserved: false,
        });
        assert_eq!(ok.to_string(), "Successfully resized a.png from 101x50 to 50x25");

        let failed = FileOutcome::failed(
            "b.png",
            ResyzeError::ZeroDimension { width: 0, height: 3 },
        );
        assert_eq!(
            failed.to_string(),
            "Error resizing b.png: Scaled size 0x3 has a zero dimension"
        );
        assert_eq!(failed.failure_kind(), Some(FailureKind::Resize));
    }

    #[test]
    fn test_resize_errors_share_a_kind() {
        let panicked = ResyzeError::Resize {
            path: PathBuf::from("x.jpg"),
            reason: "decoder panicked".to_string(),
        };
        assert_eq!(panicked.to_string(), "Resize failed: decoder panicked");
        assert_eq!(panicked.kind(), FailureKind::Resize);

        let too_large = ResyzeError::DimensionsTooLarge {
            width: 200_000,
            height: 10,
            limit: "100000 pixels per side".to_string(),
        };
        assert_eq!(
            too_large.to_string(),
            "Scaled size 200000x10 exceeds the 100000 pixels per side limit"
        );
        assert_eq!(too_large.kind(), FailureKind::Resize);
    }

    #[test]
    fn test_stats_aggregation() {
        let mut stats = ProcessingStats::default();
        stats.record(FileOutcome::failed(
            "x.jpg",
            ResyzeError::Resize {
                path: PathBuf::from("x.jpg"),
                reason: "boom".to_string(),
            },
        ));
        assert_eq!(stats.attempted_count(), 1);
        assert_eq!(stats.failed_count(), 1);
        assert_eq!(stats.processed_count(), 0);
        assert!(stats.has_failures());
    }
}
