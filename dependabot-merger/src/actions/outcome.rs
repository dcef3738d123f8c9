//! Action outcome types.

use crate::config::MergeMethod;
use serde::Serialize;

/// What happened to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Pull request merged.
    Merged {
        /// Strategy used.
        method: MergeMethod,
    },

    /// Regeneration comment posted.
    CommentPosted,

    /// Nothing done.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// The action failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl ActionOutcome {
    /// Returns the outcome as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merged { .. } => "merged",
            Self::CommentPosted => "comment_posted",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}
