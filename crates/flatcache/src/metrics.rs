//! Entry listing and directory statistics

use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use tracing::warn;

use crate::{cache::read_snapshot, expiry, FlatFileCache, Result};

/// One entry file as seen on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name (the file name)
    pub name: String,
    /// Size of the serialized value
    pub size_bytes: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// When the directory was listed
    pub listed_at: SystemTime,
    /// Age at the time of listing
    pub age: Duration,
}

impl EntryInfo {
    /// Whether `get` with this TTL would still return the entry
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        expiry::is_fresh(self.modified, ttl, self.listed_at)
    }
}

/// Aggregate view of a cache directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entry files
    pub entries: usize,
    /// Total size of all entry files in bytes
    pub total_bytes: u64,
    /// Age of the oldest entry
    pub oldest_age: Option<Duration>,
}

impl CacheStats {
    fn from_entries(entries: &[EntryInfo]) -> Self {
        Self {
            entries: entries.len(),
            total_bytes: entries.iter().map(|e| e.size_bytes).sum(),
            oldest_age: entries.iter().map(|e| e.age).max(),
        }
    }
}

impl FlatFileCache {
    /// List the entry files of `directory` (or the cache's own), sorted by name
    pub fn entries(&self, directory: Option<&Path>) -> Result<Vec<EntryInfo>> {
        let directory = directory.unwrap_or(self.directory());
        let now = SystemTime::now();

        let mut entries = Vec::new();
        for entry in read_snapshot(directory)? {
            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    warn!(target: "flatcache", path = %path.display(), error = %e, "Cannot stat cache entry");
                    continue;
                }
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
                modified,
                listed_at: now,
                age: expiry::age(modified, now),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Count and size of the entries in `directory` (or the cache's own)
    pub fn stats(&self, directory: Option<&Path>) -> Result<CacheStats> {
        Ok(CacheStats::from_entries(&self.entries(directory)?))
    }
}
