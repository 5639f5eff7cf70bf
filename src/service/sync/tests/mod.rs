//! Unit tests for the synchronization stages.


use super::*;
