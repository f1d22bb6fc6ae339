//! Error types for the fetch layer.

use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while talking to the remote table service.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout or request-building failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The count endpoint returned something other than an integer.
    #[error("invalid count response: {0:?}")]
    InvalidCount(String),

    /// A listing body could not be decoded.
    #[error("failed to decode listing: {0}")]
    Decode(#[from] serde_json::Error),

    /// A row has no usable value in the key field.
    #[error("row has no value for key field {0}")]
    MissingKey(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Returns true if this error came from talking to the service rather
    /// than from local input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Http(_)
                | FetchError::Status { .. }
                | FetchError::InvalidCount(_)
                | FetchError::Decode(_)
        )
    }

    /// Returns the HTTP status code, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
