//! Repositories over the sea-orm store.
//!
//! One repository per collection, each borrowing a `DatabaseConnection`. Repositories hold
//! no business rules: they translate snapshots and records into queries and back.

pub mod availability_cache;
pub mod cache_snapshot;
pub mod conference;
pub mod player;
pub mod roster_entry;
pub mod roster_history;
pub mod season;
pub mod sync_status;
pub mod team;
pub mod team_conference;
pub mod team_season;
