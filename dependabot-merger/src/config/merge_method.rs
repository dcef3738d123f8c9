//! Merge strategy used when merging a pull request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a pull request gets merged into its base branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one.
    #[default]
    Squash,
    /// Create a merge commit.
    Merge,
    /// Rebase commits onto the base branch.
    Rebase,
}

impl MergeMethod {
    /// Returns the method as the API spells it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squash => "squash",
            Self::Merge => "merge",
            Self::Rebase => "rebase",
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a merge method string is not one of `squash`, `merge` or `rebase`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown merge method '{0}' (expected squash, merge or rebase)")]
pub struct ParseMergeMethodError(pub String);

impl FromStr for MergeMethod {
    type Err = ParseMergeMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            _ => Err(ParseMergeMethodError(s.to_string())),
        }
    }
}
