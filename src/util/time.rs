//! Time calculation helpers.

use chrono::{NaiveDateTime, TimeDelta, Utc};

/// Delay between a completed sync and the next one it schedules.
pub const NEXT_SYNC_INTERVAL: TimeDelta = TimeDelta::hours(6);

/// Current UTC time as stored in the database.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// When the next sync is due, relative to `completed_at`.
pub fn next_sync_due(completed_at: NaiveDateTime) -> NaiveDateTime {
    completed_at + NEXT_SYNC_INTERVAL
}

/// Age of a stored timestamp relative to `now`, clamped to zero for future timestamps.
pub fn age_of(stored_at: NaiveDateTime, now: NaiveDateTime) -> std::time::Duration {
    (now - stored_at).to_std().unwrap_or_default()
}

/// Timestamp `age` before `now`, clamped to the earliest representable time.
pub fn cutoff(now: NaiveDateTime, age: std::time::Duration) -> NaiveDateTime {
    TimeDelta::from_std(age)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(NaiveDateTime::MIN)
}
