//! Cache configuration and directory resolution

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Default lifetime of an entry on read, in seconds
pub const DEFAULT_TTL_SECS: u64 = 10;

/// Default maximum age used by the expired-entry sweep (one day)
pub const DEFAULT_SWEEP_MAX_AGE_SECS: u64 = 86_400;

/// Prefix of environment variables read by [`CacheConfig::load`]
pub const ENV_PREFIX: &str = "FLATCACHE";

/// Serving root; the default cache directory sits next to it
pub const DOCUMENT_ROOT_VAR: &str = "DOCUMENT_ROOT";

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Explicit cache directory; resolved from the environment when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// TTL applied by `get` when no explicit TTL is given
    pub default_ttl_secs: u64,
    /// Maximum age applied by the default expired-entry sweep
    pub sweep_max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: None,
            default_ttl_secs: DEFAULT_TTL_SECS,
            sweep_max_age_secs: DEFAULT_SWEEP_MAX_AGE_SECS,
        }
    }
}

impl CacheConfig {
    /// Default configuration pinned to `directory`
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Self::default()
        }
    }

    /// Load configuration from an optional TOML file, then `FLATCACHE_*`
    /// environment variables. Later sources win.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn sweep_max_age(&self) -> Duration {
        Duration::from_secs(self.sweep_max_age_secs)
    }

    /// Resolve the cache directory
    ///
    /// Priority:
    /// 1. `directory` from this config
    /// 2. `$DOCUMENT_ROOT/../cache`
    /// 3. the platform cache directory joined with `flatcache`
    /// 4. `./cache`
    pub fn resolve_directory(&self) -> PathBuf {
        if let Some(directory) = &self.directory {
            return directory.clone();
        }

        if let Ok(root) = std::env::var(DOCUMENT_ROOT_VAR) {
            if !root.is_empty() {
                return PathBuf::from(root).join("..").join("cache");
            }
        }

        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("flatcache");
        }

        PathBuf::from("cache")
    }
}
