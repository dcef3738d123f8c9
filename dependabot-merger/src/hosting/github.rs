//! GitHub implementation of [`HostingApi`] built on octocrab.

use super::{ApiError, HostingApi, Listing};
use crate::config::MergeMethod;
use crate::discovery::Repository;
use crate::pull_requests::{MergeableState, PullRequestCandidate};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Results per page for listing calls.
const RESULTS_PER_PAGE: u8 = 100;

/// Authenticated GitHub REST client.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Builds a client authenticated with a personal access token.
    ///
    /// `api_url` overrides the API base, e.g. `https://ghe.example.com/api/v3`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is rejected or the client can't be built.
    pub fn new(token: &str, api_url: Option<&Url>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url {
            builder = builder.base_uri(url.as_str())?;
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

/// Subset of the pull request resource needed to judge mergeability.
#[derive(Debug, Deserialize)]
struct PullRequestMergeability {
    state: Option<String>,
    mergeable: Option<bool>,
    mergeable_state: Option<String>,
}

impl PullRequestMergeability {
    fn into_state(self, number: u64) -> Result<MergeableState, ApiError> {
        if self.state.as_deref() == Some("closed") {
            return Err(ApiError::NotFound {
                message: format!("pull request #{number} is closed"),
            });
        }
        Ok(MergeableState::from_api(
            self.mergeable_state.as_deref(),
            self.mergeable,
        ))
    }
}

/// The repository listing endpoint only accepts a `u8` page number.
fn repository_page(page: u32) -> Result<u8, ApiError> {
    u8::try_from(page).map_err(|_| ApiError::GitHub {
        status: 0,
        message: format!("repository listing exceeds {} pages", u8::MAX),
    })
}

fn convert_repository(repo: octocrab::models::Repository) -> Option<Repository> {
    let owner = repo.owner.as_ref()?.login.clone();
    let full_name = repo
        .full_name
        .clone()
        .unwrap_or_else(|| format!("{}/{}", owner, repo.name));

    Some(Repository {
        owner,
        name: repo.name,
        full_name,
        default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
        archived: repo.archived.unwrap_or(false),
    })
}

fn convert_pull_request(
    repository: &Repository,
    pr: octocrab::models::pulls::PullRequest,
) -> PullRequestCandidate {
    let url = pr
        .html_url
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| {
            format!(
                "https://github.com/{}/pull/{}",
                repository.full_name, pr.number
            )
        });

    PullRequestCandidate {
        repository: repository.full_name.clone(),
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr.user.map(|user| user.login).unwrap_or_default(),
        url,
    }
}

#[async_trait]
impl HostingApi for GitHubClient {
    async fn authenticated_login(&self) -> Result<String, ApiError> {
        let user = self.octocrab.current().user().await?;
        debug!(login = %user.login, "Authenticated");
        Ok(user.login)
    }

    async fn list_repositories(
        &self,
        owner: Option<&str>,
        page: u32,
    ) -> Result<Listing<Repository>, ApiError> {
        let affiliation = if owner.is_some() {
            "owner,organization_member"
        } else {
            "owner"
        };
        debug!(page, affiliation, "Listing repositories");
        let page = repository_page(page)?;

        let result = self
            .octocrab
            .current()
            .list_repos_for_authenticated_user()
            .affiliation(affiliation)
            .per_page(RESULTS_PER_PAGE)
            .page(page)
            .send()
            .await?;

        let has_more = result.next.is_some();
        let items = result
            .items
            .into_iter()
            .filter_map(convert_repository)
            .collect();

        Ok(Listing { items, has_more })
    }

    async fn list_open_pull_requests(
        &self,
        repository: &Repository,
        page: u32,
    ) -> Result<Listing<PullRequestCandidate>, ApiError> {
        debug!(repo = %repository.full_name, page, "Listing open pull requests");

        let result = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(RESULTS_PER_PAGE)
            .page(page)
            .send()
            .await?;

        let has_more = result.next.is_some();
        let items = result
            .items
            .into_iter()
            .map(|pr| convert_pull_request(repository, pr))
            .collect();

        Ok(Listing { items, has_more })
    }

    async fn get_mergeable_state(
        &self,
        repository: &Repository,
        number: u64,
    ) -> Result<MergeableState, ApiError> {
        let route = format!(
            "/repos/{}/{}/pulls/{}",
            repository.owner, repository.name, number
        );
        let pr: PullRequestMergeability = self.octocrab.get(route, None::<&()>).await?;
        debug!(
            repo = %repository.full_name,
            pr_number = number,
            mergeable = ?pr.mergeable,
            mergeable_state = ?pr.mergeable_state,
            "Fetched mergeability"
        );
        pr.into_state(number)
    }

    async fn merge_pull_request(
        &self,
        repository: &Repository,
        number: u64,
        method: MergeMethod,
    ) -> Result<(), ApiError> {
        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .merge(number)
            .method(octocrab_method)
            .send()
            .await?;

        if !result.merged {
            return Err(ApiError::Unmergeable {
                message: result
                    .message
                    .unwrap_or_else(|| "merge was not performed".to_string()),
            });
        }

        debug!(repo = %repository.full_name, pr_number = number, sha = ?result.sha, "Merged");
        Ok(())
    }

    async fn create_comment(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        self.octocrab
            .issues(&repository.owner, &repository.name)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError> {
        let rate_limit = self.octocrab.ratelimit().get().await?;
        let core = &rate_limit.resources.core;

        Ok(RateLimitInfo {
            remaining: core.remaining as u32,
            reset: core.reset,
            limit: core.limit as u32,
        })
    }
}
