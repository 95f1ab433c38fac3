//! Cloud sync error types.

use thiserror::Error;

/// Result type for cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors that can occur against the remote account store.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("authentication required")]
    AuthRequired,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CloudError {
    /// True for faults worth retrying: network/timeout-class transport
    /// errors, 5xx gateway responses, and rate limiting.
    pub fn is_transient(&self) -> bool {
        match self {
            CloudError::Status { code, .. } => {
                matches!(code, 429 | 502 | 503 | 504)
            }
            CloudError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => crate::retry::is_transient_error(self),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CloudError::Status { code: 429, .. })
    }
}
