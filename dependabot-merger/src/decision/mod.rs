//! Deciding what to do with a dependency-update pull request.

use crate::discovery::Repository;
use crate::hosting::{ApiError, HostingApi};
use crate::pull_requests::{MergeableState, PullRequestCandidate};
use serde::Serialize;
use tracing::{debug, info};

/// Action chosen for a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Merge it now.
    Merge,

    /// Ask the bot to recreate it.
    RequestRegeneration,

    /// Leave it for a future run.
    Skip {
        /// Why nothing is done.
        reason: String,
    },
}

impl Decision {
    /// Returns the decision as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::RequestRegeneration => "request_regeneration",
            Self::Skip { .. } => "skip",
        }
    }
}

/// Maps a mergeable state to a decision.
///
/// Conflicts are handed back to the bot. States the bot can't fix (failing
/// checks, branch protection, drafts) and states not yet computed are left
/// alone until the next run.
#[must_use]
pub fn decide(state: MergeableState) -> Decision {
    match state {
        MergeableState::Clean | MergeableState::HasHooks | MergeableState::Behind => {
            Decision::Merge
        }
        MergeableState::Dirty => Decision::RequestRegeneration,
        MergeableState::Unknown => Decision::Skip {
            reason: "mergeability not computed yet".to_string(),
        },
        MergeableState::Blocked | MergeableState::Unstable | MergeableState::Draft => {
            Decision::Skip {
                reason: format!("mergeable state is {state}"),
            }
        }
    }
}

/// Fetches the current mergeable state of `candidate` and decides on it.
///
/// A pull request that has disappeared since it was listed is skipped.
///
/// # Errors
///
/// Returns [`ApiError`] if the state can't be fetched for any other reason.
pub async fn evaluate(
    api: &dyn HostingApi,
    repository: &Repository,
    candidate: &PullRequestCandidate,
) -> Result<Decision, ApiError> {
    let state = match api.get_mergeable_state(repository, candidate.number).await {
        Ok(state) => state,
        Err(ApiError::NotFound { message }) => {
            debug!(
                repo = %repository.full_name,
                pr_number = candidate.number,
                %message,
                "Pull request no longer open"
            );
            return Ok(Decision::Skip {
                reason: "pull request no longer open".to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let decision = decide(state);
    info!(
        repo = %repository.full_name,
        pr_number = candidate.number,
        title = %candidate.title,
        mergeable_state = %state,
        decision = decision.as_str(),
        "Evaluated pull request"
    );
    Ok(decision)
}
