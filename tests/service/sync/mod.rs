//! Tests for the synchronization engine.

mod full_sync;
mod single_flight;

use super::*;
