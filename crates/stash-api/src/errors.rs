//! Error types for stash fetching.

use thiserror::Error;

/// Errors that can occur while talking to the stash provider.
#[derive(Error, Debug)]
pub enum StashApiError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited by stash provider (retry after {retry_after_secs:?}s)")]
    RateLimited {
        /// Seconds to wait, when the provider sent a `Retry-After` header
        retry_after_secs: Option<u64>,
    },

    /// The access token was rejected or lacks the stash scope.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The stash or league does not exist for this account.
    #[error("Stash not found: {0}")]
    NotFound(String),

    /// The request timed out.
    #[error("Request to stash provider timed out")]
    Timeout,

    /// Any other non-success response or connection failure.
    #[error("Stash provider error ({status:?}): {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// The response body did not match the expected stash shape.
    #[error("Failed to decode stash payload: {0}")]
    Decode(String),

    /// The client was built with unusable settings.
    #[error("Invalid stash API configuration: {0}")]
    InvalidConfig(String),
}

impl StashApiError {
    /// Whether repeating the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StashApiError::RateLimited { .. } | StashApiError::Timeout
        ) || matches!(self, StashApiError::Provider { status: Some(s), .. } if *s >= 500)
    }
}

impl From<reqwest::Error> for StashApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StashApiError::Timeout
        } else if err.is_decode() {
            StashApiError::Decode(err.to_string())
        } else {
            StashApiError::Provider {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for StashApiError {
    fn from(err: serde_json::Error) -> Self {
        StashApiError::Decode(err.to_string())
    }
}
