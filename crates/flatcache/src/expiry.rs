//! Age and expiry rules
//!
//! Entries carry no expiry field; freshness is derived from the file's
//! modification time at the moment of the check.

use std::time::{Duration, SystemTime};

/// Time elapsed since `modified`. A timestamp in the future counts as age zero.
pub fn age(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

/// Readable by `get`: `modified + ttl > now`.
///
/// An entry whose age equals the TTL is already expired.
pub fn is_fresh(modified: SystemTime, ttl: Duration, now: SystemTime) -> bool {
    modified
        .checked_add(ttl)
        .map_or(true, |expires_at| expires_at > now)
}

/// Removable by the expired-entry sweep: `modified + max_age < now`.
///
/// An entry whose age equals `max_age` is kept.
pub fn is_stale(modified: SystemTime, max_age: Duration, now: SystemTime) -> bool {
    modified
        .checked_add(max_age)
        .map_or(false, |limit| limit < now)
}
