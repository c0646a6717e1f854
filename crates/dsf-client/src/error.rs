//! Error types for API access.

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::ApiClient) operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` field of the error body, or the raw body.
        detail: String,
    },

    /// The response body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// An upload was accepted by the server but reported as failed.
    #[error("import rejected: {0}")]
    ImportRejected(String),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Returns a user-friendly error message suitable for an inline notice.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach the server. Please check that the backend is running."
            }
            Self::NotFound(_) => "The requested item was not found.",
            Self::Status { status, .. } if *status >= 500 => {
                "The server failed to process the request. Please try again."
            }
            Self::Status { .. } => "The server rejected the request.",
            Self::ImportRejected(_) => "The file was not accepted by the server.",
            Self::Io(_) => "Could not read or write the local file.",
            Self::InvalidConfig(_) => "The client configuration is invalid.",
            Self::Decode(_) => "An unexpected error occurred.",
        }
    }

    /// Returns whether the same request may succeed if the user tries again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Io(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
