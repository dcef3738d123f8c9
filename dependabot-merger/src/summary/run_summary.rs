//! Run summary types.

use super::result::ProcessingResult;
use crate::actions::ActionOutcome;
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of repositories listed (from the cache or the API).
    pub repositories_listed: usize,

    /// Number of repositories whose pull requests were handled.
    pub repositories_processed: usize,

    /// Number of repositories that could not be processed.
    pub repositories_failed: usize,

    /// Number of dependency-update pull requests found.
    pub pull_requests_found: usize,

    /// Number of pull requests merged.
    pub merged: usize,

    /// Number of regeneration comments posted.
    pub comments_posted: usize,

    /// Number of pull requests left alone.
    pub skipped: usize,

    /// Number of actions that failed.
    pub failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a repository's result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Processed { pull_requests, .. } => {
                self.repositories_processed += 1;
                self.pull_requests_found += pull_requests.len();
                for pr in pull_requests {
                    match pr.outcome {
                        ActionOutcome::Merged { .. } => self.merged += 1,
                        ActionOutcome::CommentPosted => self.comments_posted += 1,
                        ActionOutcome::Skipped { .. } => self.skipped += 1,
                        ActionOutcome::Failed { .. } => self.failed += 1,
                    }
                }
            }
            ProcessingResult::Failed { .. } => self.repositories_failed += 1,
        }
    }

    /// Returns true if any repository or action failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories_failed > 0 || self.failed > 0
    }
}
