//! Shared test helpers.

#![allow(dead_code)]

mod mock_api;

pub use mock_api::{CommentCall, MergeCall, MockApi};

use dependabot_merger::{PullRequestCandidate, Repository, RunnerConfig};
use std::path::Path;
use std::time::Duration;

/// Builds a repository from its full name.
pub fn repo(full_name: &str) -> Repository {
    Repository::from_full_name(full_name, "main").unwrap()
}

/// Builds an open pull request.
pub fn pr(repository: &str, number: u64, author: &str) -> PullRequestCandidate {
    PullRequestCandidate {
        repository: repository.to_string(),
        number,
        title: format!("Bump dependency #{number}"),
        author: author.to_string(),
        url: format!("https://github.com/{repository}/pull/{number}"),
    }
}

/// Runner configuration with no delays and the cache inside `dir`.
pub fn fast_config(dir: &Path) -> RunnerConfig {
    RunnerConfig::new("test-token".to_string())
        .with_delays(Duration::ZERO, Duration::ZERO)
        .with_cache_path(dir.join("repos_cache.json"))
        .with_respect_rate_limit(false)
}
