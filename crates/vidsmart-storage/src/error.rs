//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in the catalog store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown group: {0}")]
    InvalidGroup(String),

    #[error("Group name must not be empty")]
    EmptyGroupName,
}

impl StorageError {
    /// Create an unknown-group error.
    pub fn invalid_group(id: impl Into<String>) -> Self {
        Self::InvalidGroup(id.into())
    }
}
