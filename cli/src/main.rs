//! CLI for the Dependabot merger.
//!
//! Merges clean Dependabot pull requests across your repositories and asks
//! Dependabot to recreate the ones that conflict.

use clap::Parser;
use dependabot_merger::{MergeMethod, RunSummary, Runner, RunnerConfig, RunnerError, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dependabot Merger - Merge clean Dependabot PRs and request recreation of conflicting ones.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Only process repositories owned by this user or organization.
    #[arg(long)]
    owner: Option<String>,

    /// Login of the bot whose pull requests are handled [default: dependabot[bot]].
    #[arg(long)]
    bot_login: Option<String>,

    /// Merge method: squash, merge or rebase [default: squash].
    #[arg(long)]
    merge_method: Option<MergeMethod>,

    /// Seconds to pause after each mutating API call [default: 2].
    #[arg(long)]
    request_delay: Option<u64>,

    /// Seconds to pause between repositories [default: 3].
    #[arg(long)]
    repo_delay: Option<u64>,

    /// Path to the repository cache [default: repos_cache.json].
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Always list repositories from GitHub instead of the cache.
    #[arg(long)]
    no_cache: bool,

    /// Ignore a cache older than this many seconds.
    #[arg(long)]
    cache_max_age: Option<u64>,

    /// Decide what to do without merging or commenting.
    #[arg(long)]
    dry_run: bool,

    /// Skip the rate limit check before each repository.
    #[arg(long)]
    no_rate_limit_check: bool,

    /// GitHub API base URL (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

impl Args {
    /// Settings given on the command line. Flags left off stay unset so the
    /// settings file can provide them.
    fn to_settings(&self) -> Settings {
        Settings {
            owner: self.owner.clone(),
            bot_login: self.bot_login.clone(),
            merge_method: self.merge_method,
            request_delay_secs: self.request_delay,
            repo_delay_secs: self.repo_delay,
            cache_path: self.cache_path.clone(),
            use_cache: self.no_cache.then_some(false),
            cache_max_age_secs: self.cache_max_age,
            dry_run: self.dry_run.then_some(true),
            respect_rate_limit: self.no_rate_limit_check.then_some(false),
            api_url: self.api_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before parsing so GITHUB_TOKEN can come from it
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let file_settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.overlay(args.to_settings());
    let config = RunnerConfig::from_settings(args.token, settings)?;
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Repositories listed: {}", summary.repositories_listed);
    println!(
        "  Repositories processed: {}",
        summary.repositories_processed
    );
    println!("  Repositories failed: {}", summary.repositories_failed);
    println!("  Dependabot PRs found: {}", summary.pull_requests_found);

    if !summary.dry_run {
        println!("  PRs merged: {}", summary.merged);
        println!("  Recreate requests posted: {}", summary.comments_posted);
    }
    println!("  PRs skipped: {}", summary.skipped);
    println!("  PRs failed: {}", summary.failed);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["dependabot-merger"];
        argv.extend_from_slice(args);
        temp_env::with_vars(
            [("GITHUB_TOKEN", None::<&str>), ("GITHUB_API_URL", None)],
            || Args::try_parse_from(argv).unwrap(),
        )
    }

    #[test]
    fn no_arguments_required() {
        let args = parse(&[]);
        assert!(args.token.is_none());
        assert_eq!(args.to_settings(), Settings::default());
    }

    #[test]
    fn reads_token_from_environment() {
        let args = temp_env::with_var("GITHUB_TOKEN", Some("ghp_test"), || {
            Args::try_parse_from(["dependabot-merger"]).unwrap()
        });
        assert_eq!(args.token.as_deref(), Some("ghp_test"));
    }

    #[test]
    fn flags_become_settings() {
        let args = parse(&[
            "--owner",
            "acme",
            "--merge-method",
            "rebase",
            "--request-delay",
            "0",
            "--no-cache",
            "--dry-run",
            "--no-rate-limit-check",
        ]);
        let settings = args.to_settings();

        assert_eq!(settings.owner.as_deref(), Some("acme"));
        assert_eq!(settings.merge_method, Some(MergeMethod::Rebase));
        assert_eq!(settings.request_delay_secs, Some(0));
        assert_eq!(settings.repo_delay_secs, None);
        assert_eq!(settings.use_cache, Some(false));
        assert_eq!(settings.dry_run, Some(true));
        assert_eq!(settings.respect_rate_limit, Some(false));
    }

    #[test]
    fn rejects_unknown_merge_method() {
        let result = Args::try_parse_from(["dependabot-merger", "--merge-method", "octopus"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_token_is_a_config_error() {
        let args = parse(&[]);
        let result = run(args).await;
        assert!(matches!(
            result,
            Err(RunnerError::Config(
                dependabot_merger::ConfigError::MissingToken
            ))
        ));
    }
}
