//! Cache key validation
//!
//! A key becomes a single file name under the cache directory, so anything
//! that could make `directory.join(key)` point elsewhere is rejected.

use crate::{CacheError, Result};

/// Longest key accepted, matching the common file-name limit
pub const MAX_KEY_LEN: usize = 255;

/// Check that `key` is usable as a single file-name segment
pub fn validate_key(key: &str) -> Result<&str> {
    let reason = if key.is_empty() {
        "key is empty"
    } else if key == "." || key == ".." {
        "key is a directory marker"
    } else if key.contains(['/', '\\']) {
        "key contains a path separator"
    } else if key.contains('\0') {
        "key contains a NUL byte"
    } else if cfg!(windows) && key.contains(':') {
        "key contains a drive separator"
    } else if key.len() > MAX_KEY_LEN {
        "key is longer than 255 bytes"
    } else {
        return Ok(key);
    };

    Err(CacheError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}
