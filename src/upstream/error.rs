//! Fetch error types

use thiserror::Error;

/// Errors that can occur when fetching from the upstream API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network unreachable, connection refused, broken body, etc.
    #[error("Transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Body was not JSON, or not the expected shape
    #[error("Malformed response from {url}: {message}")]
    Parse { url: String, message: String },

    /// The HTTP client itself could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Classify a reqwest failure for the given URL
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }

    pub(crate) fn parse(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
