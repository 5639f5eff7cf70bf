//! Standard values shared by fixtures and tests.

/// User agent sent by the test Sleeper client.
pub static TEST_USER_AGENT: &str = "huddle-tests/1.0 (+https://github.com/huddle-league/huddle)";

/// Season inserted by [`TestBuilder::with_current_season`](crate::TestBuilder::with_current_season).
pub const TEST_SEASON_ID: i32 = 2024;

/// Week used by tests that don't care which week they run in.
pub const TEST_WEEK: i32 = 10;
