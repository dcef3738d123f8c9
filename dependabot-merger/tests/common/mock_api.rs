//! In-memory hosting API for tests.

use async_trait::async_trait;
use dependabot_merger::{
    ApiError, HostingApi, Listing, MergeMethod, MergeableState, PullRequestCandidate,
    RateLimitInfo, Repository,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_pull_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub repository: String,
    pub number: u64,
    pub method: MergeMethod,
}

/// Call record for `create_comment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCall {
    pub repository: String,
    pub number: u64,
    pub body: String,
}

type PrKey = (String, u64);

/// Mock hosting API.
///
/// Features:
/// - Repository listing split into pages
/// - Per-repository open pull requests and per-PR mergeable states
/// - Call tracking for verification
/// - Error injection for failure paths
#[derive(Default)]
pub struct MockApi {
    repository_pages: Mutex<Vec<Vec<Repository>>>,
    pull_requests: Mutex<HashMap<String, Vec<PullRequestCandidate>>>,
    states: Mutex<HashMap<PrKey, MergeableState>>,
    rate_limit: Mutex<Option<RateLimitInfo>>,
    pull_request_page_size: Mutex<Option<usize>>,
    // Call tracking
    login_calls: Mutex<usize>,
    list_repositories_calls: Mutex<Vec<(Option<String>, u32)>>,
    list_pull_requests_calls: Mutex<Vec<String>>,
    list_pull_requests_pages: Mutex<Vec<(String, u32)>>,
    state_calls: Mutex<Vec<PrKey>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    comment_calls: Mutex<Vec<CommentCall>>,
    rate_limit_calls: Mutex<usize>,
    // Error injection
    error_on_login: Mutex<Option<ApiError>>,
    error_on_list_repositories: Mutex<Option<ApiError>>,
    error_on_list_pull_requests: Mutex<HashMap<String, (u32, ApiError)>>,
    error_on_state: Mutex<HashMap<PrKey, ApiError>>,
    error_on_merge: Mutex<HashMap<PrKey, ApiError>>,
    error_on_comment: Mutex<HashMap<PrKey, ApiError>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    // === Setup ===

    /// Serves `repositories` as a single listing page.
    pub fn set_repositories(&self, repositories: Vec<Repository>) {
        *self.repository_pages.lock().unwrap() = vec![repositories];
    }

    /// Serves the listing as several pages.
    pub fn set_repository_pages(&self, pages: Vec<Vec<Repository>>) {
        *self.repository_pages.lock().unwrap() = pages;
    }

    /// Adds an open pull request with the given mergeable state.
    pub fn add_pull_request(&self, pr: PullRequestCandidate, state: MergeableState) {
        self.states
            .lock()
            .unwrap()
            .insert((pr.repository.clone(), pr.number), state);
        self.pull_requests
            .lock()
            .unwrap()
            .entry(pr.repository.clone())
            .or_default()
            .push(pr);
    }

    /// Splits each repository's open pull requests into pages of `size`.
    pub fn set_pull_request_page_size(&self, size: usize) {
        *self.pull_request_page_size.lock().unwrap() = Some(size);
    }

    pub fn set_rate_limit(&self, info: RateLimitInfo) {
        *self.rate_limit.lock().unwrap() = Some(info);
    }

    // === Error injection ===

    pub fn fail_login(&self, error: ApiError) {
        *self.error_on_login.lock().unwrap() = Some(error);
    }

    pub fn fail_list_repositories(&self, error: ApiError) {
        *self.error_on_list_repositories.lock().unwrap() = Some(error);
    }

    pub fn fail_list_pull_requests(&self, repository: &str, error: ApiError) {
        self.fail_list_pull_requests_from_page(repository, 1, error);
    }

    /// Fails pull request listing for `page` and every later page.
    pub fn fail_list_pull_requests_from_page(&self, repository: &str, page: u32, error: ApiError) {
        self.error_on_list_pull_requests
            .lock()
            .unwrap()
            .insert(repository.to_string(), (page, error));
    }

    pub fn fail_state(&self, repository: &str, number: u64, error: ApiError) {
        self.error_on_state
            .lock()
            .unwrap()
            .insert((repository.to_string(), number), error);
    }

    pub fn fail_merge(&self, repository: &str, number: u64, error: ApiError) {
        self.error_on_merge
            .lock()
            .unwrap()
            .insert((repository.to_string(), number), error);
    }

    pub fn fail_comment(&self, repository: &str, number: u64, error: ApiError) {
        self.error_on_comment
            .lock()
            .unwrap()
            .insert((repository.to_string(), number), error);
    }

    // === Call inspection ===

    pub fn login_calls(&self) -> usize {
        *self.login_calls.lock().unwrap()
    }

    pub fn list_repositories_calls(&self) -> Vec<(Option<String>, u32)> {
        self.list_repositories_calls.lock().unwrap().clone()
    }

    pub fn list_pull_requests_calls(&self) -> Vec<String> {
        self.list_pull_requests_calls.lock().unwrap().clone()
    }

    pub fn list_pull_requests_pages(&self) -> Vec<(String, u32)> {
        self.list_pull_requests_pages.lock().unwrap().clone()
    }

    pub fn state_calls(&self) -> Vec<PrKey> {
        self.state_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn comment_calls(&self) -> Vec<CommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn rate_limit_calls(&self) -> usize {
        *self.rate_limit_calls.lock().unwrap()
    }
}

#[async_trait]
impl HostingApi for MockApi {
    async fn authenticated_login(&self) -> Result<String, ApiError> {
        *self.login_calls.lock().unwrap() += 1;
        match self.error_on_login.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok("octocat".to_string()),
        }
    }

    async fn list_repositories(
        &self,
        owner: Option<&str>,
        page: u32,
    ) -> Result<Listing<Repository>, ApiError> {
        self.list_repositories_calls
            .lock()
            .unwrap()
            .push((owner.map(str::to_string), page));

        if let Some(error) = self.error_on_list_repositories.lock().unwrap().clone() {
            return Err(error);
        }

        let pages = self.repository_pages.lock().unwrap();
        let index = (page as usize).saturating_sub(1);
        Ok(Listing {
            items: pages.get(index).cloned().unwrap_or_default(),
            has_more: index + 1 < pages.len(),
        })
    }

    async fn list_open_pull_requests(
        &self,
        repository: &Repository,
        page: u32,
    ) -> Result<Listing<PullRequestCandidate>, ApiError> {
        if page == 1 {
            self.list_pull_requests_calls
                .lock()
                .unwrap()
                .push(repository.full_name.clone());
        }
        self.list_pull_requests_pages
            .lock()
            .unwrap()
            .push((repository.full_name.clone(), page));

        if let Some((from_page, error)) = self
            .error_on_list_pull_requests
            .lock()
            .unwrap()
            .get(&repository.full_name)
        {
            if page >= *from_page {
                return Err(error.clone());
            }
        }

        let all = self
            .pull_requests
            .lock()
            .unwrap()
            .get(&repository.full_name)
            .cloned()
            .unwrap_or_default();

        let Some(size) = *self.pull_request_page_size.lock().unwrap() else {
            let items = if page == 1 { all } else { Vec::new() };
            return Ok(Listing::last(items));
        };

        let start = (page as usize).saturating_sub(1) * size;
        let end = (start + size).min(all.len());
        Ok(Listing {
            items: all.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
            has_more: end < all.len(),
        })
    }

    async fn get_mergeable_state(
        &self,
        repository: &Repository,
        number: u64,
    ) -> Result<MergeableState, ApiError> {
        let key = (repository.full_name.clone(), number);
        self.state_calls.lock().unwrap().push(key.clone());

        if let Some(error) = self.error_on_state.lock().unwrap().get(&key) {
            return Err(error.clone());
        }

        self.states
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .ok_or_else(|| ApiError::NotFound {
                message: format!("{}#{number}", repository.full_name),
            })
    }

    async fn merge_pull_request(
        &self,
        repository: &Repository,
        number: u64,
        method: MergeMethod,
    ) -> Result<(), ApiError> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            repository: repository.full_name.clone(),
            number,
            method,
        });

        let key = (repository.full_name.clone(), number);
        match self.error_on_merge.lock().unwrap().get(&key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn create_comment(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        self.comment_calls.lock().unwrap().push(CommentCall {
            repository: repository.full_name.clone(),
            number,
            body: body.to_string(),
        });

        let key = (repository.full_name.clone(), number);
        match self.error_on_comment.lock().unwrap().get(&key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError> {
        *self.rate_limit_calls.lock().unwrap() += 1;
        self.rate_limit
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Network {
                message: "rate limit endpoint unavailable".to_string(),
            })
    }
}
