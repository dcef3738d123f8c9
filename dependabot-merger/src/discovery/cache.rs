//! On-disk cache of the repository list.
//!
//! The cache is a JSON document:
//!
//! ```json
//! { "cached_at": 1700000000, "repositories": [ { "owner": "...", ... } ] }
//! ```
//!
//! A bare array of GitHub repository objects (each with at least
//! `full_name`) is read as well. Such a cache has no timestamp and never
//! expires.

use super::{CacheError, Repository};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Contents of the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Unix timestamp of the listing, if known.
    pub cached_at: Option<u64>,

    /// Repositories in listing order.
    pub repositories: Vec<Repository>,
}

/// Repository entry of a bare-array cache.
#[derive(Debug, Deserialize)]
struct ArrayEntry {
    full_name: String,
    default_branch: Option<String>,
    #[serde(default)]
    archived: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CacheFile {
    Record(CacheRecord),
    Array(Vec<ArrayEntry>),
}

impl CacheFile {
    fn into_record(self) -> CacheRecord {
        match self {
            Self::Record(record) => record,
            Self::Array(entries) => {
                let repositories = entries
                    .into_iter()
                    .filter_map(|entry| {
                        let branch = entry.default_branch.as_deref().unwrap_or("main");
                        let repository = Repository::from_full_name(&entry.full_name, branch);
                        if repository.is_none() {
                            warn!(full_name = %entry.full_name, "Ignoring malformed cache entry");
                        }
                        repository.map(|repo| Repository {
                            archived: entry.archived,
                            ..repo
                        })
                    })
                    .collect();
                CacheRecord {
                    cached_at: None,
                    repositories,
                }
            }
        }
    }
}

/// Reads and writes the repository cache file.
#[derive(Debug, Clone)]
pub struct RepositoryCache {
    path: PathBuf,
    max_age: Option<Duration>,
}

impl RepositoryCache {
    /// Creates a cache stored at `path` whose entries never expire.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: None,
        }
    }

    /// Treats entries older than `max_age` as absent.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached repositories.
    ///
    /// Returns `Ok(None)` when there is no cache file or it has expired.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file exists but can't be read or parsed.
    pub fn load(&self) -> Result<Option<Vec<Repository>>, CacheError> {
        self.load_at(unix_now())
    }

    fn load_at(&self, now: u64) -> Result<Option<Vec<Repository>>, CacheError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No repository cache");
                return Ok(None);
            }
            Err(e) => {
                return Err(CacheError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        let file: CacheFile =
            serde_json::from_str(&content).map_err(|e| CacheError::Corrupt {
                path: self.path.display().to_string(),
                source: e,
            })?;
        let record = file.into_record();

        if let (Some(max_age), Some(cached_at)) = (self.max_age, record.cached_at) {
            let age = now.saturating_sub(cached_at);
            if age > max_age.as_secs() {
                debug!(
                    path = %self.path.display(),
                    age_secs = age,
                    max_age_secs = max_age.as_secs(),
                    "Repository cache expired"
                );
                return Ok(None);
            }
        }

        Ok(Some(record.repositories))
    }

    /// Writes `repositories` to the cache, replacing any previous contents.
    ///
    /// The file is written to a temporary sibling first and then moved into
    /// place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file can't be written.
    pub fn store(&self, repositories: &[Repository]) -> Result<(), CacheError> {
        let record = CacheRecord {
            cached_at: Some(unix_now()),
            repositories: repositories.to_vec(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|e| CacheError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let io_error = |source: std::io::Error| CacheError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_error)?;

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.persist(&self.path).map_err(|e| io_error(e.error))?;

        debug!(
            path = %self.path.display(),
            count = repositories.len(),
            "Wrote repository cache"
        );
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
