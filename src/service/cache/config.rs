use std::time::Duration;

use crate::service::{cache::CachePolicy, retry::RetryPolicy};

/// Availability records are fresh for 5 minutes and served stale for up to an hour.
pub const AVAILABILITY_CACHE_POLICY: CachePolicy = CachePolicy {
    stale_after: Duration::from_secs(5 * 60),
    hard_expire: Duration::from_secs(60 * 60),
};

/// League rosters are fresh for 2 minutes and served stale for up to 30 minutes.
pub const ROSTER_CACHE_POLICY: CachePolicy = CachePolicy {
    stale_after: Duration::from_secs(2 * 60),
    hard_expire: Duration::from_secs(30 * 60),
};

/// Key prefix of roster snapshots in the `cache_snapshot` table.
pub const ROSTER_SNAPSHOT_PREFIX: &str = "rosters";
/// Bump when the layout of mirrored roster payloads changes.
pub const ROSTER_SNAPSHOT_VERSION: &str = "rosters-v1";

/// Retry policy of roster loads made by the cache itself.
pub fn roster_retry_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(500)).with_max_backoff(Duration::from_secs(10))
}
