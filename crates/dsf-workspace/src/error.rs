//! Workspace error types.

use std::path::PathBuf;

use dsf_client::ApiError;
use thiserror::Error;

/// Errors raised by workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A request to the backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The disease id is not in the loaded set.
    #[error("unknown disease: {0}")]
    UnknownDisease(String),

    /// A loaded disease list contained the same id twice.
    #[error("disease list contains duplicate id: {0}")]
    DuplicateDisease(String),

    /// Another request is in flight and the action is disabled until it completes.
    #[error("another request is in progress")]
    Busy,

    /// Writing an exported file failed.
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkspaceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message().to_string(),
            Self::UnknownDisease(id) => format!("No disease with id {id} is loaded."),
            Self::DuplicateDisease(_) => {
                "The server returned an inconsistent disease list.".to_string()
            }
            Self::Busy => "Please wait for the current request to finish.".to_string(),
            Self::Io { path, .. } => format!("Could not write {}.", path.display()),
        }
    }
}

/// Result type alias for workspace operations.
pub type Result<T> = std::result::Result<T, WorkspaceError>;
