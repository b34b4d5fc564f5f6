pub mod config;
pub mod engine;
pub mod extractor;
pub mod fs;
pub mod index;
pub mod logging;
pub mod metrics;

pub use extractor::{CandidateFile, CronGroupIndexer, FileIndexer, FileType, INDEX_VERSION};
