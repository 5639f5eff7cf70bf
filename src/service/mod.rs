pub mod availability;
pub mod cache;
pub mod integrity;
pub mod retry;
pub mod roster;
pub mod sync;
