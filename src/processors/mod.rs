// resyze/src/processors/mod.rs
mod batch;
mod discovery;
mod encoder;
mod loader;
mod metadata;
mod resizer;

pub use batch::BatchProcessor;
pub use discovery::{DiscoveredFile, Discoverer};
pub use encoder::Encoder;
pub use loader::{LoadedImage, Loader};
pub use metadata::{MetadataBlob, MetadataProcessor};
pub use resizer::Resizer;
