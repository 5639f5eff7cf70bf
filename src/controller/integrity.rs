use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        integrity::{CleanupResult, IntegrityReport},
    },
    service::integrity::IntegrityService,
};

pub static INTEGRITY_TAG: &str = "integrity";

/// Audit the reconciled data for structural problems without changing anything
#[utoipa::path(
    get,
    path = "/api/integrity/audit",
    tag = INTEGRITY_TAG,
    responses(
        (status = 200, description = "Integrity report", body = IntegrityReport),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn audit(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let report = IntegrityService::new(&state.db).audit().await?;

    Ok((StatusCode::OK, axum::Json(report)).into_response())
}

/// Repair the problems an audit reports
///
/// Orphans are removed first, then duplicates, then missing or inactive junctions, then
/// surplus current roster entries. A failing step is reported in `errors` and the
/// remaining steps still run.
#[utoipa::path(
    post,
    path = "/api/integrity/cleanup",
    tag = INTEGRITY_TAG,
    responses(
        (status = 200, description = "Changes made by the cleanup", body = CleanupResult),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cleanup(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let result = IntegrityService::new(&state.db).cleanup().await?;

    if result.changes() > 0 {
        state.availability.invalidate_all().await;
    }

    Ok((StatusCode::OK, axum::Json(result)).into_response())
}
