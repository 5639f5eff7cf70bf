//! Test fixtures for database records and mock Sleeper endpoints.
//!
//! - `factory` - Sleeper snapshot values with standard test data
//! - `league` - Seasons, conferences, teams, players and roster entries in the database
//! - `sleeper` - Mock HTTP endpoints of the Sleeper API

pub mod factory;
pub mod league;
pub mod sleeper;
