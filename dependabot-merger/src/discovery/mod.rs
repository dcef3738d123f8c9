//! Repository discovery.
//!
//! Lists the repositories to process, either from the local cache or by
//! paging through the hosting API.

mod cache;
mod error;
mod repository;

pub use cache::{CacheRecord, RepositoryCache};
pub use error::CacheError;
pub use repository::Repository;

use crate::hosting::{ApiError, HostingApi};
use crate::rate_limit::Pacer;
use tracing::{debug, info, info_span, warn, Instrument};

/// Returns the repositories to process.
///
/// With `use_cache`, a readable and unexpired cache is returned without its
/// archived entries and no listing call is made. A corrupt cache is logged
/// and ignored. Otherwise every page is fetched, archived repositories and
/// those not owned by `owner` are dropped, and the result is written back to
/// the cache.
///
/// # Errors
///
/// Returns [`ApiError`] if a listing call fails. Failing to write the cache
/// is only logged.
pub async fn list_repositories(
    api: &dyn HostingApi,
    owner: Option<&str>,
    cache: &RepositoryCache,
    use_cache: bool,
    pacer: &Pacer,
) -> Result<Vec<Repository>, ApiError> {
    let span = info_span!("list_repositories", owner = owner.unwrap_or("<self>"));

    async {
        if use_cache {
            match cache.load() {
                Ok(Some(cached)) => {
                    let repositories: Vec<Repository> =
                        cached.into_iter().filter(|repo| !repo.archived).collect();
                    info!(
                        path = %cache.path().display(),
                        count = repositories.len(),
                        "Loaded cached repositories"
                    );
                    return Ok(repositories);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable repository cache");
                }
            }
        }

        info!("Fetching repositories from GitHub");
        let listed = fetch_all(api, owner, pacer).await?;
        let total = listed.len();
        let repositories = select_repositories(listed, owner);
        debug!(
            listed = total,
            kept = repositories.len(),
            "Filtered repositories"
        );

        match cache.store(&repositories) {
            Ok(()) => info!(
                path = %cache.path().display(),
                count = repositories.len(),
                "Cached repositories"
            ),
            Err(e) => warn!(error = %e, "Failed to write repository cache"),
        }

        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Pages through the repository listing.
async fn fetch_all(
    api: &dyn HostingApi,
    owner: Option<&str>,
    pacer: &Pacer,
) -> Result<Vec<Repository>, ApiError> {
    let mut repositories = Vec::new();
    let mut page = 1;

    loop {
        let listing = api.list_repositories(owner, page).await?;
        repositories.extend(listing.items);

        if !listing.has_more {
            break;
        }
        page += 1;
        pacer.after_request().await;
    }

    Ok(repositories)
}

/// Drops archived repositories and, if `owner` is given, those owned by
/// anyone else. Owner logins compare case-insensitively.
fn select_repositories(repositories: Vec<Repository>, owner: Option<&str>) -> Vec<Repository> {
    repositories
        .into_iter()
        .filter(|repo| !repo.archived)
        .filter(|repo| owner.map_or(true, |owner| repo.owner.eq_ignore_ascii_case(owner)))
        .collect()
}
