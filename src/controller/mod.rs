//! HTTP controller endpoints for the Huddle web API.
//!
//! Axum handlers for player availability, conference rosters, synchronization control and
//! data integrity.
//! Controllers parse path and query parameters, call into the services held by
//! [`AppState`](crate::model::app::AppState) and map results to JSON responses, with
//! utoipa annotations feeding the OpenAPI document.

pub mod availability;
pub mod conference;
pub mod integrity;
pub mod sync;
