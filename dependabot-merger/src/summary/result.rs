//! Processing result types.

use crate::actions::ActionOutcome;
use serde::Serialize;

/// Outcome for a single pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestResult {
    /// Pull request number.
    pub number: u64,
    /// Pull request title.
    pub title: String,
    /// What happened.
    pub outcome: ActionOutcome,
}

/// Result of processing a single repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// All candidates were handled (individual actions may still have failed).
    Processed {
        /// Repository full name.
        repository: String,
        /// One entry per candidate pull request.
        pull_requests: Vec<PullRequestResult>,
    },

    /// The repository could not be processed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl ProcessingResult {
    /// Returns the repository this result belongs to.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Processed { repository, .. } | Self::Failed { repository, .. } => repository,
        }
    }
}
