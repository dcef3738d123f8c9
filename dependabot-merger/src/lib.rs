#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod actions;
pub mod config;
pub mod decision;
pub mod discovery;
pub mod hosting;
pub mod pull_requests;
pub mod rate_limit;
pub mod runner;
pub mod summary;

pub use actions::{execute, ActionOutcome};
pub use config::{ConfigError, MergeMethod, Settings, REGENERATE_COMMENT};
pub use decision::{decide, evaluate, Decision};
pub use discovery::{list_repositories, CacheError, Repository, RepositoryCache};
pub use hosting::{ApiError, GitHubClient, HostingApi, Listing};
pub use pull_requests::{list_dependabot_prs, MergeableState, PullRequestCandidate};
pub use rate_limit::{ensure_core_rate_limit, wait_if_needed, Pacer, RateLimitInfo};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, PullRequestResult, RunSummary};
