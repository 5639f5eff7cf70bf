//! Huddle keeps the rosters of several fantasy football conferences in sync with the
//! Sleeper platform and answers "who owns this player?" from a local, cached view.
//!
//! The crate is organised as a server application: repositories in [`data`] wrap the
//! sea-orm store, [`service`] holds the synchronization engine, caches, availability
//! calculator and integrity auditor, and [`controller`]/[`router`] expose them over HTTP.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod source;
pub mod startup;
pub mod util;
