//! Typed, read-only client for the Sleeper fantasy football REST API.
//!
//! The client is deliberately thin: every call maps to exactly one HTTP request and
//! returns the decoded snapshot. It performs no retries and keeps no cache, callers
//! own both concerns.
//!
//! ```no_run
//! # async fn example() -> Result<(), sleeper_api::Error> {
//! let client = sleeper_api::Client::builder()
//!     .user_agent("huddle/0.1 (admin@example.com)")
//!     .build()?;
//!
//! let rosters = client.league().get_rosters("1048000000000000000").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod model;

pub use client::{Client, ClientBuilder};
pub use error::Error;
