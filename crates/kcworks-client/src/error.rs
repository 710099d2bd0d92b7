//! Error types for the proxy fetch boundary.

use thiserror::Error;

/// Errors that can occur while fetching records from the proxy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure (connection, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The proxy answered with a non-success status code.
    #[error("proxy returned HTTP {status}")]
    Status { status: u16 },

    /// A response was received but could not be parsed as JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The proxy base URL could not be parsed.
    #[error("invalid proxy URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Returns whether a user-triggered resubmission could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { status: 500..=599 })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
