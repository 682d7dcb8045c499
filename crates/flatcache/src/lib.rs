//! # flatcache
//!
//! A flat-file key/value cache. Each entry is one JSON file named after its
//! key, placed directly under a single cache directory. Expiration is read off
//! the file's modification time, so there is no index and no stored expiry.
//!
//! ## Features
//!
//! - **Put/get/delete** of JSON values, plus typed helpers over `serde`
//! - **Read-time TTL**: an entry is fresh while `mtime + ttl > now`
//! - **Sweeps**: remove every entry, or only those older than a maximum age
//! - **Layered configuration**: TOML file, `FLATCACHE_*` environment variables,
//!   and a `DOCUMENT_ROOT`-derived default directory
//!
//! ```no_run
//! use flatcache::{CacheConfig, FlatFileCache};
//! use serde_json::json;
//!
//! let cache = FlatFileCache::open(CacheConfig::with_directory("/tmp/app-cache"))?;
//! cache.put("session_42", &json!({ "user": "alice" }))?;
//! assert_eq!(cache.get("session_42"), Some(json!({ "user": "alice" })));
//! # Ok::<(), flatcache::CacheError>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod expiry;
pub mod key;
pub mod metrics;
pub mod sweep;

pub use cache::FlatFileCache;
pub use config::CacheConfig;
pub use error::{CacheError, IoOperation, Result};
pub use key::validate_key;
pub use metrics::{CacheStats, EntryInfo};
pub use sweep::SweepReport;
