//! Endpoint groups exposed through [`crate::Client`].

pub mod league;
pub mod players;
