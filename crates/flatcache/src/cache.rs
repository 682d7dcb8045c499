//! Flat-file cache: one JSON file per entry under a single directory

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::CacheConfig,
    error::{CacheError, IoOperation, Result},
    expiry,
    key::validate_key,
};

/// Filesystem-backed key/value cache with read-time TTL
#[derive(Debug, Clone)]
pub struct FlatFileCache {
    directory: PathBuf,
    default_ttl: Duration,
    sweep_max_age: Duration,
}

impl FlatFileCache {
    /// Create a cache from configuration without touching the disk
    pub fn new(config: CacheConfig) -> Self {
        Self {
            directory: config.resolve_directory(),
            default_ttl: config.default_ttl(),
            sweep_max_age: config.sweep_max_age(),
        }
    }

    /// Create a cache and make sure its directory exists
    pub fn open(config: CacheConfig) -> Result<Self> {
        let cache = Self::new(config);
        cache.init()?;
        Ok(cache)
    }

    /// Open a cache configured from `FLATCACHE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::open(CacheConfig::load(None)?)
    }

    /// Create the cache directory if it does not exist yet.
    ///
    /// A failure is logged and returned to the caller.
    pub fn init(&self) -> Result<()> {
        if self.directory.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.directory).map_err(|source| {
            error!(
                target: "flatcache",
                path = %self.directory.display(),
                error = %source,
                "Failed to create cache folder"
            );
            CacheError::DirectoryCreation {
                path: self.directory.clone(),
                source,
            }
        })
    }

    /// Directory currently holding the entries
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Point every subsequent operation at `directory`
    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn sweep_max_age(&self) -> Duration {
        self.sweep_max_age
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.directory.join(validate_key(name)?))
    }

    /// Store `value` under `name`, replacing any previous content.
    ///
    /// The write refreshes the file's mtime, which restarts the entry's TTL.
    pub fn put(&self, name: &str, value: &Value) -> Result<()> {
        let path = self.entry_path(name)?;
        let text = serde_json::to_string(value)?;

        fs::write(&path, &text).map_err(|e| CacheError::io(&path, IoOperation::Write, e))?;
        debug!(target: "flatcache", key = name, bytes = text.len(), "Stored cache entry");
        Ok(())
    }

    /// Serialize any `Serialize` type and store it.
    ///
    /// The conversion is lossy for non-finite floats: JSON has no NaN or
    /// infinity, so those are stored as `null`.
    pub fn put_as<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.put(name, &value)
    }

    /// Read `name` using the configured default TTL
    pub fn get(&self, name: &str) -> Option<Value> {
        self.get_with_ttl(name, self.default_ttl)
    }

    /// Read `name` if it exists and is younger than `ttl`.
    ///
    /// Missing, expired, unreadable and malformed entries all yield `None`.
    pub fn get_with_ttl(&self, name: &str, ttl: Duration) -> Option<Value> {
        let path = match self.entry_path(name) {
            Ok(path) => path,
            Err(e) => {
                debug!(target: "flatcache", error = %e, "Lookup with invalid key");
                return None;
            }
        };

        let metadata = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(target: "flatcache", key = name, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(target: "flatcache", key = name, error = %e, "Cannot stat cache entry");
                return None;
            }
        };

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(e) => {
                warn!(target: "flatcache", key = name, error = %e, "No modification time for cache entry");
                return None;
            }
        };

        if !expiry::is_fresh(modified, ttl, SystemTime::now()) {
            debug!(target: "flatcache", key = name, ttl_secs = ttl.as_secs(), "Cache entry expired");
            return None;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(target: "flatcache", key = name, error = %e, "Cannot read cache entry");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(target: "flatcache", key = name, error = %e, "Corrupt cache entry");
                None
            }
        }
    }

    /// Read and decode `name` into `T` using the default TTL
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get_as_with_ttl(name, self.default_ttl)
    }

    /// Read and decode `name` into `T`; a shape mismatch yields `None`
    pub fn get_as_with_ttl<T: DeserializeOwned>(&self, name: &str, ttl: Duration) -> Option<T> {
        let value = self.get_with_ttl(name, ttl)?;
        serde_json::from_value(value)
            .map_err(|e| {
                warn!(target: "flatcache", key = name, error = %e, "Cache entry has unexpected shape");
            })
            .ok()
    }

    /// Remove `name`. Returns whether an entry was actually removed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let Ok(path) = self.entry_path(name) else {
            return Ok(false);
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(target: "flatcache", key = name, "Deleted cache entry");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(&path, IoOperation::Delete, e)),
        }
    }

    /// Entry file exists, regardless of its age
    pub fn contains(&self, name: &str) -> bool {
        self.entry_path(name).map_or(false, |path| path.is_file())
    }
}

/// Snapshot of the directory's children at call time
pub(crate) fn read_snapshot(directory: &Path) -> Result<Vec<fs::DirEntry>> {
    let entries =
        fs::read_dir(directory).map_err(|e| CacheError::io(directory, IoOperation::List, e))?;

    let mut snapshot = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => snapshot.push(entry),
            Err(e) => {
                warn!(target: "flatcache", path = %directory.display(), error = %e, "Skipping unreadable directory entry");
            }
        }
    }
    Ok(snapshot)
}
