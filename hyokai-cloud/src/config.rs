//! Cloud sync configuration.

use crate::retry::RetryPolicy;

/// Configuration for the remote account store client.
#[derive(Clone, Debug)]
pub struct CloudConfig {
    /// Base URL for the Hyokai API (e.g., "https://api.hyokai.app").
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Backoff schedule shared by the migration step and the mirror.
    pub retry: RetryPolicy,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.hyokai.app".to_string(),
            request_timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

impl CloudConfig {
    /// Config pointed at a local or mock server.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            api_base_url: url.into(),
            ..Self::default()
        }
    }
}
