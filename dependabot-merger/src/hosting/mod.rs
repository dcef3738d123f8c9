//! Access to the code hosting service.
//!
//! [`HostingApi`] covers every call the merger makes. [`GitHubClient`] is the
//! production implementation; tests supply their own.

mod error;
mod github;

pub use error::ApiError;
pub use github::GitHubClient;

use crate::config::MergeMethod;
use crate::discovery::Repository;
use crate::pull_requests::{MergeableState, PullRequestCandidate};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Whether another page follows.
    pub has_more: bool,
}

impl<T> Listing<T> {
    /// A page with nothing after it.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: false,
        }
    }
}

/// Operations the merger needs from the hosting service.
///
/// Page numbers start at 1.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Returns the login of the authenticated identity.
    async fn authenticated_login(&self) -> Result<String, ApiError>;

    /// Lists one page of repositories visible to the authenticated identity.
    ///
    /// Without an `owner`, only repositories the identity owns are listed.
    /// With one, organization repositories are included as well; callers
    /// still filter by owner.
    async fn list_repositories(
        &self,
        owner: Option<&str>,
        page: u32,
    ) -> Result<Listing<Repository>, ApiError>;

    /// Lists one page of open pull requests, from every author.
    async fn list_open_pull_requests(
        &self,
        repository: &Repository,
        page: u32,
    ) -> Result<Listing<PullRequestCandidate>, ApiError>;

    /// Fetches the current mergeable state of an open pull request.
    ///
    /// Returns [`ApiError::NotFound`] if the pull request no longer exists or
    /// has been closed.
    async fn get_mergeable_state(
        &self,
        repository: &Repository,
        number: u64,
    ) -> Result<MergeableState, ApiError>;

    /// Merges a pull request.
    ///
    /// Returns [`ApiError::Unmergeable`] if the service refuses the merge.
    async fn merge_pull_request(
        &self,
        repository: &Repository,
        number: u64,
        method: MergeMethod,
    ) -> Result<(), ApiError>;

    /// Posts a comment on a pull request's conversation.
    async fn create_comment(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError>;

    /// Returns the core (REST) rate limit status.
    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError>;
}
