//! Runner configuration.

use crate::config::{
    ConfigError, MergeMethod, Settings, DEFAULT_BOT_LOGIN, DEFAULT_CACHE_FILE,
    DEFAULT_REPO_DELAY_SECS, DEFAULT_REQUEST_DELAY_SECS,
};
use crate::discovery::RepositoryCache;
use crate::rate_limit::Pacer;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Restrict processing to repositories of this owner.
    owner: Option<String>,
    /// Login of the bot whose pull requests are handled.
    bot_login: String,
    /// Merge strategy.
    merge_method: MergeMethod,
    /// Pause after each mutating call and between listing pages.
    request_delay: Duration,
    /// Pause after each repository.
    repo_delay: Duration,
    /// Repository cache location.
    cache_path: PathBuf,
    /// Whether the repository cache may stand in for a live listing.
    use_cache: bool,
    /// Maximum age of a usable cache.
    cache_max_age: Option<Duration>,
    /// Whether to decide without acting.
    dry_run: bool,
    /// Whether to wait when the core rate limit runs low.
    respect_rate_limit: bool,
    /// GitHub API base URL override.
    api_url: Option<Url>,
}

impl RunnerConfig {
    /// Creates a configuration with default settings.
    pub fn new(token: String) -> Self {
        Self {
            token,
            owner: None,
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
            merge_method: MergeMethod::default(),
            request_delay: Duration::from_secs(DEFAULT_REQUEST_DELAY_SECS),
            repo_delay: Duration::from_secs(DEFAULT_REPO_DELAY_SECS),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            use_cache: true,
            cache_max_age: None,
            dry_run: false,
            respect_rate_limit: true,
            api_url: None,
        }
    }

    /// Builds a configuration from a token and merged settings.
    ///
    /// Unset settings keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if the token is absent or blank,
    /// and [`ConfigError::InvalidUrl`] if the API URL doesn't parse.
    pub fn from_settings(token: Option<String>, settings: Settings) -> Result<Self, ConfigError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(token);

        if let Some(owner) = settings.owner {
            config.owner = Some(owner);
        }
        if let Some(bot_login) = settings.bot_login {
            config.bot_login = bot_login;
        }
        if let Some(merge_method) = settings.merge_method {
            config.merge_method = merge_method;
        }
        if let Some(secs) = settings.request_delay_secs {
            config.request_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.repo_delay_secs {
            config.repo_delay = Duration::from_secs(secs);
        }
        if let Some(cache_path) = settings.cache_path {
            config.cache_path = cache_path;
        }
        if let Some(use_cache) = settings.use_cache {
            config.use_cache = use_cache;
        }
        if let Some(secs) = settings.cache_max_age_secs {
            config.cache_max_age = Some(Duration::from_secs(secs));
        }
        if let Some(dry_run) = settings.dry_run {
            config.dry_run = dry_run;
        }
        if let Some(respect) = settings.respect_rate_limit {
            config.respect_rate_limit = respect;
        }
        if let Some(url) = settings.api_url {
            let parsed = Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
                url: url.clone(),
                source: e,
            })?;
            config.api_url = Some(parsed);
        }

        Ok(config)
    }

    /// Restricts the run to one owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the bot login.
    pub fn with_bot_login(mut self, bot_login: impl Into<String>) -> Self {
        self.bot_login = bot_login.into();
        self
    }

    /// Sets the merge strategy.
    pub fn with_merge_method(mut self, merge_method: MergeMethod) -> Self {
        self.merge_method = merge_method;
        self
    }

    /// Sets the request and repository delays.
    pub fn with_delays(mut self, request_delay: Duration, repo_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self.repo_delay = repo_delay;
        self
    }

    /// Sets the cache file path.
    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = cache_path.into();
        self
    }

    /// Enables or disables reading the cache.
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Sets the maximum usable cache age.
    pub fn with_cache_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.cache_max_age = max_age;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables the rate limit check before each repository.
    pub fn with_respect_rate_limit(mut self, respect: bool) -> Self {
        self.respect_rate_limit = respect;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the owner filter.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the bot login.
    pub fn bot_login(&self) -> &str {
        &self.bot_login
    }

    /// Returns the merge strategy.
    pub fn merge_method(&self) -> MergeMethod {
        self.merge_method
    }

    /// Returns the cache file path.
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns whether the cache may be used.
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether the rate limit is checked before each repository.
    pub fn respect_rate_limit(&self) -> bool {
        self.respect_rate_limit
    }

    /// Returns the API base URL override.
    pub fn api_url(&self) -> Option<&Url> {
        self.api_url.as_ref()
    }

    /// Returns a pacer for the configured delays.
    pub fn pacer(&self) -> Pacer {
        Pacer::new(self.request_delay, self.repo_delay)
    }

    /// Returns the repository cache.
    pub fn cache(&self) -> RepositoryCache {
        RepositoryCache::new(&self.cache_path).with_max_age(self.cache_max_age)
    }
}
