//! Runner error types.

use crate::hosting::ApiError;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors, including a missing token.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The credential was rejected.
    #[error(transparent)]
    Auth(ApiError),

    /// The repository list could not be fetched.
    #[error("Failed to list repositories: {0}")]
    Listing(ApiError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
