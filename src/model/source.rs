//! Snapshot types returned by the external fantasy data source.
//!
//! The engine consumes Sleeper's JSON shapes directly; these aliases keep the rest of the
//! crate independent of where the types are defined.

/// Entry of the player catalog, keyed by external player id.
pub type PlayerSnapshot = sleeper_api::model::Player;

/// One roster of a league: full player list plus starter, reserve and taxi subsets.
pub type RosterSnapshot = sleeper_api::model::Roster;

/// Standings and waiver settings attached to a roster snapshot.
pub type RosterSettingsSnapshot = sleeper_api::model::RosterSettings;

/// Member of a league, used to name team owners.
pub type LeagueUserSnapshot = sleeper_api::model::LeagueUser;

/// One roster's side of a weekly matchup.
pub type MatchupSnapshot = sleeper_api::model::Matchup;
