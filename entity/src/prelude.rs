pub use super::availability_cache::Entity as AvailabilityCache;
pub use super::cache_snapshot::Entity as CacheSnapshot;
pub use super::conference::Entity as Conference;
pub use super::player::Entity as Player;
pub use super::roster_entry::Entity as RosterEntry;
pub use super::roster_history::Entity as RosterHistory;
pub use super::season::Entity as Season;
pub use super::sync_status::Entity as SyncStatus;
pub use super::team::Entity as Team;
pub use super::team_conference::Entity as TeamConference;
pub use super::team_season::Entity as TeamSeason;
