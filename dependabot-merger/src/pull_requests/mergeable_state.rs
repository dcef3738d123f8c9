//! Mergeable state reported by the hosting API.

use serde::Serialize;
use std::fmt;

/// Whether a pull request can currently be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeableState {
    /// No conflicts and all requirements met.
    Clean,
    /// Merge conflicts with the base branch.
    Dirty,
    /// Not computed yet, or checks still running.
    Unknown,
    /// Branch protection requirements are not met.
    Blocked,
    /// Head branch is out of date but can still be merged.
    Behind,
    /// Mergeable, but non-required checks are failing.
    Unstable,
    /// The pull request is a draft.
    Draft,
    /// Mergeable, with pre-receive hooks configured.
    HasHooks,
}

impl MergeableState {
    /// Builds a state from the `mergeable_state` string and `mergeable` flag
    /// of a pull request resource.
    ///
    /// The string wins when it is recognised; otherwise the flag decides.
    #[must_use]
    pub fn from_api(mergeable_state: Option<&str>, mergeable: Option<bool>) -> Self {
        match mergeable_state {
            Some("clean") => Self::Clean,
            Some("dirty") => Self::Dirty,
            Some("blocked") => Self::Blocked,
            Some("behind") => Self::Behind,
            Some("unstable") => Self::Unstable,
            Some("draft") => Self::Draft,
            Some("has_hooks") => Self::HasHooks,
            _ => match mergeable {
                Some(true) => Self::Clean,
                Some(false) => Self::Dirty,
                None => Self::Unknown,
            },
        }
    }

    /// Returns the state as the API spells it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Unknown => "unknown",
            Self::Blocked => "blocked",
            Self::Behind => "behind",
            Self::Unstable => "unstable",
            Self::Draft => "draft",
            Self::HasHooks => "has_hooks",
        }
    }
}

impl fmt::Display for MergeableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
