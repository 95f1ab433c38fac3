//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded: needed {needed} of {capacity} bytes")]
    QuotaExceeded { needed: u64, capacity: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// True for capacity faults, which callers handle by trimming rather
    /// than failing.
    pub fn is_quota(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}
