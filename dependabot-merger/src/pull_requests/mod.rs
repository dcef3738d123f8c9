//! Scanning repositories for open dependency-update pull requests.

mod candidate;
mod mergeable_state;

pub use candidate::PullRequestCandidate;
pub use mergeable_state::MergeableState;

use crate::discovery::Repository;
use crate::hosting::{ApiError, HostingApi};
use crate::rate_limit::Pacer;
use tracing::{debug, info, warn};

/// Lists the open pull requests in `repository` authored by `bot_login`.
///
/// Pages through every open pull request and drops those opened by anyone
/// else. A repository without bot pull requests yields an empty vector, as
/// does one whose pull requests can't be read (404 or 403). In that case any
/// pages already fetched are kept.
///
/// # Errors
///
/// Returns [`ApiError`] for any other listing failure, such as a network or
/// authentication error.
pub async fn list_dependabot_prs(
    api: &dyn HostingApi,
    repository: &Repository,
    bot_login: &str,
    pacer: &Pacer,
) -> Result<Vec<PullRequestCandidate>, ApiError> {
    let mut open = Vec::new();
    let mut page = 1;

    loop {
        let listing = match api.list_open_pull_requests(repository, page).await {
            Ok(listing) => listing,
            Err(e @ (ApiError::NotFound { .. } | ApiError::GitHub { status: 403, .. })) => {
                warn!(
                    repo = %repository.full_name,
                    page,
                    error = %e,
                    "Pull requests not accessible, keeping what was listed"
                );
                break;
            }
            Err(e) => return Err(e),
        };
        open.extend(listing.items);

        if !listing.has_more {
            break;
        }
        page += 1;
        pacer.after_request().await;
    }

    let total = open.len();
    let candidates = filter_by_author(open, bot_login);

    debug!(
        repo = %repository.full_name,
        open = total,
        "Listed open pull requests"
    );
    info!(
        repo = %repository.full_name,
        count = candidates.len(),
        "Found dependency-update pull requests"
    );

    Ok(candidates)
}

/// Keeps only pull requests opened by `bot_login`.
fn filter_by_author(
    pull_requests: Vec<PullRequestCandidate>,
    bot_login: &str,
) -> Vec<PullRequestCandidate> {
    pull_requests
        .into_iter()
        .filter(|pr| pr.author == bot_login)
        .collect()
}
