//! Utility functions shared by services, controllers and the scheduler.

pub mod time;
