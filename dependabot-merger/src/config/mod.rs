//! Configuration loading.
//!
//! Holds the built-in defaults, the merge method type and the optional
//! TOML settings file.

mod error;
mod merge_method;
mod settings;

pub use error::ConfigError;
pub use merge_method::{MergeMethod, ParseMergeMethodError};
pub use settings::Settings;

/// Login of the Dependabot app.
pub const DEFAULT_BOT_LOGIN: &str = "dependabot[bot]";

/// Default location of the repository cache.
pub const DEFAULT_CACHE_FILE: &str = "repos_cache.json";

/// Default pause after each mutating API call.
pub const DEFAULT_REQUEST_DELAY_SECS: u64 = 2;

/// Default pause between repositories.
pub const DEFAULT_REPO_DELAY_SECS: u64 = 3;

/// Comment that asks Dependabot to rebuild its pull request from scratch.
pub const REGENERATE_COMMENT: &str = "@dependabot recreate";
