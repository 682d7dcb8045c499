//! Bulk removal of entries

use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use tracing::{debug, info, warn};

use crate::{cache::read_snapshot, expiry, FlatFileCache, Result};

/// Outcome of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entry files considered
    pub scanned: usize,
    /// Entry files removed
    pub removed: usize,
    /// Removals that failed; each one was logged and skipped
    pub failed: usize,
}

impl FlatFileCache {
    /// Remove every entry older than `max_age` from `directory`, or from the
    /// cache's own directory when `None`.
    ///
    /// An entry whose age equals `max_age` is kept.
    pub fn remove_expired(&self, directory: Option<&Path>, max_age: Duration) -> Result<SweepReport> {
        let now = SystemTime::now();
        let report = self.sweep(directory, |modified| expiry::is_stale(modified, max_age, now))?;
        debug!(
            target: "flatcache",
            max_age_secs = max_age.as_secs(),
            removed = report.removed,
            "Removed expired cache entries"
        );
        Ok(report)
    }

    /// [`remove_expired`](Self::remove_expired) with the configured maximum age
    pub fn remove_expired_default(&self, directory: Option<&Path>) -> Result<SweepReport> {
        self.remove_expired(directory, self.sweep_max_age())
    }

    /// Remove every entry from `directory`, or from the cache's own directory
    pub fn remove_all(&self, directory: Option<&Path>) -> Result<SweepReport> {
        let report = self.sweep(directory, |_| true)?;
        info!(
            target: "flatcache",
            directory = %directory.unwrap_or(self.directory()).display(),
            removed = report.removed,
            "Cache was cleared"
        );
        Ok(report)
    }

    fn sweep<F>(&self, directory: Option<&Path>, mut should_remove: F) -> Result<SweepReport>
    where
        F: FnMut(SystemTime) -> bool,
    {
        let directory = directory.unwrap_or(self.directory());
        let mut report = SweepReport::default();

        for entry in read_snapshot(directory)? {
            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(target: "flatcache", path = %path.display(), error = %e, "Cannot stat cache entry");
                    report.failed += 1;
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            report.scanned += 1;
            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(e) => {
                    warn!(target: "flatcache", path = %path.display(), error = %e, "No modification time for cache entry");
                    report.failed += 1;
                    continue;
                }
            };
            if !should_remove(modified) {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(target: "flatcache", path = %path.display(), "Removed cache entry");
                    report.removed += 1;
                }
                Err(e) => {
                    warn!(target: "flatcache", path = %path.display(), error = %e, "Failed to remove cache entry");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
