//! Repository information.

use serde::{Deserialize, Serialize};

/// A repository whose pull requests are processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Default branch name (e.g., "main").
    pub default_branch: String,

    /// Whether the repository is archived (read-only).
    #[serde(default)]
    pub archived: bool,
}

impl Repository {
    /// Builds a repository from its "owner/name" full name.
    ///
    /// Returns `None` if `full_name` isn't of that form.
    pub fn from_full_name(full_name: &str, default_branch: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            full_name: full_name.to_string(),
            default_branch: default_branch.to_string(),
            archived: false,
        })
    }
}
