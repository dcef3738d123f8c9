//! Carrying out decisions against the hosting API.

mod outcome;

pub use outcome::ActionOutcome;

use crate::config::{MergeMethod, REGENERATE_COMMENT};
use crate::decision::Decision;
use crate::discovery::Repository;
use crate::hosting::{ApiError, HostingApi};
use crate::pull_requests::PullRequestCandidate;
use crate::rate_limit::Pacer;
use tracing::{info, info_span, warn, Instrument};

/// Performs `decision` on `candidate`.
///
/// Merges use `merge_method`; regeneration requests post
/// [`REGENERATE_COMMENT`]. In a dry run nothing is sent and the outcome is
/// [`ActionOutcome::Skipped`]. Each mutating call is followed by the
/// pacer's request delay.
///
/// A pull request that became unmergeable or disappeared since it was
/// evaluated is reported as skipped; other API errors become
/// [`ActionOutcome::Failed`].
///
/// # Errors
///
/// Only authentication failures are returned as errors, since they end the
/// run.
pub async fn execute(
    api: &dyn HostingApi,
    repository: &Repository,
    candidate: &PullRequestCandidate,
    decision: &Decision,
    merge_method: MergeMethod,
    dry_run: bool,
    pacer: &Pacer,
) -> Result<ActionOutcome, ApiError> {
    let span = info_span!(
        "execute",
        repo = %repository.full_name,
        pr_number = candidate.number,
        decision = decision.as_str()
    );

    async {
        if dry_run {
            let reason = match decision {
                Decision::Merge => format!("dry run: would {merge_method} merge"),
                Decision::RequestRegeneration => "dry run: would request regeneration".to_string(),
                Decision::Skip { reason } => reason.clone(),
            };
            info!(%reason, "Not acting");
            return Ok(ActionOutcome::Skipped { reason });
        }

        let outcome = match decision {
            Decision::Merge => {
                let result = api
                    .merge_pull_request(repository, candidate.number, merge_method)
                    .await;
                pacer.after_request().await;
                result.map(|()| ActionOutcome::Merged {
                    method: merge_method,
                })
            }
            Decision::RequestRegeneration => {
                let result = api
                    .create_comment(repository, candidate.number, REGENERATE_COMMENT)
                    .await;
                pacer.after_request().await;
                result.map(|()| ActionOutcome::CommentPosted)
            }
            Decision::Skip { reason } => Ok(ActionOutcome::Skipped {
                reason: reason.clone(),
            }),
        };

        match outcome {
            Ok(outcome) => {
                info!(outcome = outcome.as_str(), "Action complete");
                Ok(outcome)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(ApiError::Unmergeable { message }) => {
                warn!(%message, "Pull request changed before it could be merged, skipping");
                Ok(ActionOutcome::Skipped {
                    reason: format!("no longer mergeable: {message}"),
                })
            }
            Err(ApiError::NotFound { message }) => {
                warn!(%message, "Pull request no longer open, skipping");
                Ok(ActionOutcome::Skipped {
                    reason: "pull request no longer open".to_string(),
                })
            }
            Err(e) => {
                warn!(error = %e, "Action failed");
                Ok(ActionOutcome::Failed {
                    error: e.to_string(),
                })
            }
        }
    }
    .instrument(span)
    .await
}
