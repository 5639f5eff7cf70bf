//! sea-orm entities for every collection persisted by huddle.

pub mod prelude;

pub mod availability_cache;
pub mod cache_snapshot;
pub mod conference;
pub mod player;
pub mod roster_entry;
pub mod roster_history;
pub mod sea_orm_active_enums;
pub mod season;
pub mod sync_status;
pub mod team;
pub mod team_conference;
pub mod team_season;
