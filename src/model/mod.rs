//! Server application models and type definitions.
//!
//! Plain data exchanged between services, controllers and the scheduler: engine
//! configuration and results, availability records, integrity reports, roster actions,
//! and type aliases for external snapshot models.

pub mod api;
pub mod app;
pub mod availability;
pub mod integrity;
pub mod roster;
pub mod source;
pub mod sync;
