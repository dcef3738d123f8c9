//! Pull request candidate.

use serde::Serialize;

/// An open pull request that may be merged or sent back for regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PullRequestCandidate {
    /// Full name of the repository ("owner/name").
    pub repository: String,

    /// Pull request number.
    pub number: u64,

    /// Pull request title.
    pub title: String,

    /// Login of the pull request author.
    pub author: String,

    /// Web URL of the pull request.
    pub url: String,
}

impl PullRequestCandidate {
    /// Returns the `(repository, number)` pair identifying this pull request.
    #[must_use]
    pub fn key(&self) -> (String, u64) {
        (self.repository.clone(), self.number)
    }
}
