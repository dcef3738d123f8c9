//! Hosting API error types.

use thiserror::Error;

/// Errors returned by a [`HostingApi`](super::HostingApi) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The credential is missing, expired or was rejected.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The request never got a response from the API.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The resource does not exist (or is no longer open).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The pull request cannot be merged in its current state.
    #[error("Pull request is not mergeable: {message}")]
    Unmergeable { message: String },

    /// Any other error response.
    #[error("GitHub API error ({status}): {message}")]
    GitHub { status: u16, message: String },
}

impl ApiError {
    /// Returns true if the error means the run cannot continue.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match &error {
            octocrab::Error::GitHub { source, .. } => {
                let message = source.message.clone();
                match source.status_code.as_u16() {
                    401 => Self::Auth { message },
                    404 => Self::NotFound { message },
                    405 | 409 => Self::Unmergeable { message },
                    status => Self::GitHub { status, message },
                }
            }
            _ => Self::Network {
                message: error.to_string(),
            },
        }
    }
}
