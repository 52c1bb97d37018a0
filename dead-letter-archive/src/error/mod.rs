pub mod resolve;

use crate::core::client::storage::StorageError;
use std::time::Duration;
use thiserror::Error;

pub use resolve::ResolveError;

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that fail an archive invocation. Per-record enrichment problems are
/// logged and never surface here.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Missing or invalid destination configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid dead letter batch: {0}")]
    InvalidBatch(String),

    #[error("Failed to write archive object {key}: {source}")]
    ArchiveWriteFailed {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Archive invocation did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
