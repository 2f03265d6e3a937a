use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Failed to list documents: {0}")]
    SourceListingFailed(String),

    #[error("Failed to fetch {path}: {message}")]
    DocumentFetchFailed { path: String, message: String },

    #[error("Rebuild timed out after {0:?}")]
    RebuildTimedOut(Duration),

    #[error("Rebuild failed: {0}")]
    RebuildFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}
