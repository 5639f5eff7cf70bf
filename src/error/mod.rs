//! Error types for the Huddle server application.
//!
//! Domain-specific errors (configuration, synchronization, caching, roster writes) are
//! aggregated with external library errors into the single [`Error`] type. All errors
//! implement `IntoResponse` so controllers can return them directly.

pub mod cache;
pub mod config;
pub mod retry;
pub mod roster;
pub mod sync;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{cache::CacheError, config::ConfigError, roster::RosterError, sync::SyncError},
    model::api::ErrorDto,
};

/// Main error type for the Huddle server application.
///
/// Uses `thiserror`'s `#[from]` conversions so the `?` operator lifts domain and library
/// errors into it. [`Error::to_retry_strategy`] classifies each variant as transient or
/// permanent for the retry machinery.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Synchronization error (single-flight rejection, stopped runs).
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Local cache layer error.
    #[error(transparent)]
    CacheError(#[from] CacheError),
    /// Roster mutation rejected because the store does not hold the expected state.
    #[error(transparent)]
    RosterError(#[from] RosterError),
    /// Sleeper client error (transport failures, HTTP error statuses, decoding).
    #[error(transparent)]
    SourceError(#[from] sleeper_api::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - For roster lookups that found nothing
/// - 409 Conflict - When a synchronization is already running
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::SyncError(err) => err.into_response(),
            Self::RosterError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details do not leak to
/// API consumers.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
