//! Optional settings file.
//!
//! Every key mirrors a command-line flag. Values given on the command line
//! win over values from the file, which win over the built-in defaults.
//!
//! ```toml
//! owner = "my-org"
//! merge-method = "rebase"
//! request-delay-secs = 1
//! repo-delay-secs = 2
//! cache-path = "repos_cache.json"
//! cache-max-age-secs = 86400
//! ```

use crate::config::{ConfigError, MergeMethod};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Partially specified configuration, as read from a settings file or
/// collected from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Only process repositories owned by this user or organization.
    pub owner: Option<String>,

    /// Login of the bot whose pull requests are handled.
    pub bot_login: Option<String>,

    /// Merge strategy.
    pub merge_method: Option<MergeMethod>,

    /// Seconds to sleep after each mutating API call and between listing pages.
    pub request_delay_secs: Option<u64>,

    /// Seconds to sleep after finishing a repository.
    pub repo_delay_secs: Option<u64>,

    /// Location of the repository cache file.
    pub cache_path: Option<PathBuf>,

    /// Whether the repository cache may be used instead of a live listing.
    pub use_cache: Option<bool>,

    /// Cache entries older than this are ignored.
    pub cache_max_age_secs: Option<u64>,

    /// Decide only, never merge or comment.
    pub dry_run: Option<bool>,

    /// Wait for the core rate limit to reset when it runs low.
    pub respect_rate_limit: Option<bool>,

    /// GitHub API base URL (for GitHub Enterprise).
    pub api_url: Option<String>,
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, parsed or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings file");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses settings from TOML text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text isn't valid settings TOML or fails validation.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;
        settings.validate(path)?;
        Ok(settings)
    }

    /// Returns `self` with every value that `overrides` sets replaced.
    #[must_use]
    pub fn overlay(self, overrides: Settings) -> Settings {
        Settings {
            owner: overrides.owner.or(self.owner),
            bot_login: overrides.bot_login.or(self.bot_login),
            merge_method: overrides.merge_method.or(self.merge_method),
            request_delay_secs: overrides.request_delay_secs.or(self.request_delay_secs),
            repo_delay_secs: overrides.repo_delay_secs.or(self.repo_delay_secs),
            cache_path: overrides.cache_path.or(self.cache_path),
            use_cache: overrides.use_cache.or(self.use_cache),
            cache_max_age_secs: overrides.cache_max_age_secs.or(self.cache_max_age_secs),
            dry_run: overrides.dry_run.or(self.dry_run),
            respect_rate_limit: overrides.respect_rate_limit.or(self.respect_rate_limit),
            api_url: overrides.api_url.or(self.api_url),
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let blank = |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());

        if blank(&self.owner) {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "owner cannot be empty".to_string(),
            });
        }

        if blank(&self.bot_login) {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "bot-login cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
