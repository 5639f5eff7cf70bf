//! Snapshot types returned by the Sleeper API.

pub mod league;
pub mod player;

pub use league::{LeagueUser, LeagueUserMetadata, Matchup, Roster, RosterSettings};
pub use player::Player;
