/*!
 * Kernel Counter Source
 * Capability trait over the kernel wake lock counter store
 */

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Counter source errors with the failing path attached
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to enumerate {path}: {source}")]
    Enumerate { path: String, source: io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Hierarchical text-counter store: one sub-resource per kernel wake lock,
/// one readable field per counter.
///
/// Implementations carry no shared mutable state; every call observes the
/// store as it currently is, so repeated queries see wake locks that
/// appeared since the previous query.
pub trait KernelStatsSource: Send + Sync {
    /// Names of all kernel wake locks currently exposed
    fn list_wakelocks(&self) -> SourceResult<Vec<String>>;

    /// Names of the counter fields available for one wake lock
    fn list_stats(&self, wakelock: &str) -> SourceResult<Vec<String>>;

    /// Raw text value of one counter field
    fn read_stat(&self, wakelock: &str, stat: &str) -> SourceResult<String>;
}

/// Production source over a sysfs-style directory tree
/// (e.g. `/sys/class/wakeup`)
#[derive(Debug, Clone)]
pub struct SysfsStatsSource {
    root: PathBuf,
}

impl SysfsStatsSource {
    /// Create a source rooted at the counter-store directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn list_names(&self, dir: PathBuf) -> SourceResult<Vec<String>> {
        let path = dir.display().to_string();
        let entries = fs::read_dir(&dir).map_err(|source| SourceError::Enumerate {
            path: path.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::Enumerate {
                path: path.clone(),
                source,
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

impl KernelStatsSource for SysfsStatsSource {
    fn list_wakelocks(&self) -> SourceResult<Vec<String>> {
        self.list_names(self.root.clone())
    }

    fn list_stats(&self, wakelock: &str) -> SourceResult<Vec<String>> {
        self.list_names(self.root.join(wakelock))
    }

    fn read_stat(&self, wakelock: &str, stat: &str) -> SourceResult<String> {
        let path = self.root.join(wakelock).join(stat);
        fs::read_to_string(&path).map_err(|source| SourceError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}
