use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Another synchronization currently holds the single-flight guard.
    #[error("A synchronization is already in progress")]
    SyncInProgress,
    /// The requested season has no conferences to synchronize.
    #[error("No conferences are configured for season {0}")]
    NoConferences(i32),
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        match self {
            Self::SyncInProgress => (
                StatusCode::CONFLICT,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::NoConferences(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
