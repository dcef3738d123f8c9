//! Orchestrates a merge pass over every repository.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::actions::{execute, ActionOutcome};
use crate::config::ConfigError;
use crate::decision::evaluate;
use crate::discovery::{list_repositories, Repository};
use crate::hosting::{ApiError, GitHubClient, HostingApi};
use crate::pull_requests::list_dependabot_prs;
use crate::rate_limit::{ensure_core_rate_limit, Pacer};
use crate::summary::{ProcessingResult, PullRequestResult, RunSummary};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Runs one sequential pass: list repositories, then scan, decide and act on
/// each repository's dependency-update pull requests.
pub struct Runner {
    config: RunnerConfig,
    api: Arc<dyn HostingApi>,
    pacer: Pacer,
}

impl Runner {
    /// Builds a runner that talks to GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the token is blank and
    /// [`RunnerError::Octocrab`] if the client can't be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        if config.token().trim().is_empty() {
            return Err(ConfigError::MissingToken.into());
        }
        let client = GitHubClient::new(config.token(), config.api_url())?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Builds a runner on top of any [`HostingApi`].
    pub fn with_api(config: RunnerConfig, api: Arc<dyn HostingApi>) -> Self {
        let pacer = config.pacer();
        Self { config, api, pacer }
    }

    /// Executes the full pass.
    ///
    /// Failures confined to one repository or one pull request are logged
    /// and recorded in the summary; the pass always continues to the next
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Auth`] if the credential is rejected at any
    /// point, and [`RunnerError::Listing`] if the repository list can't be
    /// obtained.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let api = self.api.as_ref();

        match api.authenticated_login().await {
            Ok(login) => info!(%login, "Authenticated with GitHub"),
            Err(e) if e.is_fatal() => return Err(RunnerError::Auth(e)),
            Err(e) => warn!(error = %e, "Could not verify credentials, continuing"),
        }

        let repositories = list_repositories(
            api,
            self.config.owner(),
            &self.config.cache(),
            self.config.use_cache(),
            &self.pacer,
        )
        .await
        .map_err(|e| {
            if e.is_fatal() {
                RunnerError::Auth(e)
            } else {
                RunnerError::Listing(e)
            }
        })?;

        info!(count = repositories.len(), "Total repositories to process");
        summary.repositories_listed = repositories.len();

        let mut handled = HashSet::new();
        for (index, repository) in repositories.iter().enumerate() {
            info!(
                repo = %repository.full_name,
                "[{}/{}] Checking repository",
                index + 1,
                repositories.len()
            );

            if self.config.respect_rate_limit() {
                match ensure_core_rate_limit(api).await {
                    Ok(()) => {}
                    Err(e) if e.is_fatal() => return Err(RunnerError::Auth(e)),
                    Err(e) => warn!(error = %e, "Rate limit check failed, continuing"),
                }
            }

            let result = match self.process_repository(repository, &mut handled).await {
                Ok(result) => result,
                Err(e) if e.is_fatal() => return Err(RunnerError::Auth(e)),
                Err(e) => {
                    error!(
                        repo = %repository.full_name,
                        error = %e,
                        "Failed to process repository"
                    );
                    ProcessingResult::Failed {
                        repository: repository.full_name.clone(),
                        error: e.to_string(),
                    }
                }
            };
            summary.record_result(&result);

            self.pacer.after_repository().await;
        }

        Ok(summary)
    }

    /// Handles every bot pull request in one repository.
    ///
    /// A candidate whose evaluation fails is recorded as failed and the
    /// remaining candidates are still handled. Only a failed listing or an
    /// authentication error is returned.
    async fn process_repository(
        &self,
        repository: &Repository,
        handled: &mut HashSet<(String, u64)>,
    ) -> Result<ProcessingResult, ApiError> {
        let span = info_span!("repository", repo = %repository.full_name);

        async {
            let api = self.api.as_ref();
            let candidates =
                list_dependabot_prs(api, repository, self.config.bot_login(), &self.pacer).await?;

            let mut pull_requests = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                if !handled.insert(candidate.key()) {
                    debug!(pr_number = candidate.number, "Already handled this run");
                    continue;
                }

                let outcome = match evaluate(api, repository, &candidate).await {
                    Ok(decision) => {
                        execute(
                            api,
                            repository,
                            &candidate,
                            &decision,
                            self.config.merge_method(),
                            self.config.dry_run(),
                            &self.pacer,
                        )
                        .await?
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!(
                            pr_number = candidate.number,
                            error = %e,
                            "Failed to evaluate pull request"
                        );
                        ActionOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                };

                info!(
                    pr_number = candidate.number,
                    outcome = outcome.as_str(),
                    url = %candidate.url,
                    "Handled pull request"
                );
                pull_requests.push(PullRequestResult {
                    number: candidate.number,
                    title: candidate.title,
                    outcome,
                });
            }

            Ok(ProcessingResult::Processed {
                repository: repository.full_name.clone(),
                pull_requests,
            })
        }
        .instrument(span)
        .await
    }
}
