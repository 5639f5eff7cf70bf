use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    data::{conference::ConferenceRepository, season::SeasonRepository},
    error::{sync::SyncError, Error},
    model::{
        api::{ErrorDto, SyncRequestDto, SyncStopDto},
        app::AppState,
        sync::{ConferenceTarget, SyncResult, SyncState},
    },
};

pub static SYNC_TAG: &str = "sync";

/// Run a full synchronization of players and every conference of a season
///
/// The request waits for the run to finish. Per-item failures are listed in the result's
/// `errors` rather than failing the request.
#[utoipa::path(
    post,
    path = "/api/sync",
    tag = SYNC_TAG,
    request_body = SyncRequestDto,
    responses(
        (status = 200, description = "Result of the synchronization", body = SyncResult),
        (status = 404, description = "No season or no conferences to synchronize", body = ErrorDto),
        (status = 409, description = "A synchronization is already in progress", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn run_sync(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<SyncRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let season_id = match request.season_id {
        Some(season_id) => season_id,
        None => match SeasonRepository::new(&state.db).find_current().await? {
            Some(season) => season.id,
            None => {
                return Ok((
                    StatusCode::NOT_FOUND,
                    axum::Json(ErrorDto {
                        error: "No current season".to_string(),
                    }),
                )
                    .into_response())
            }
        },
    };

    let conferences: Vec<ConferenceTarget> = ConferenceRepository::new(&state.db)
        .get_by_season(season_id)
        .await?
        .into_iter()
        .map(ConferenceTarget::from)
        .collect();

    if conferences.is_empty() {
        return Err(SyncError::NoConferences(season_id).into());
    }

    let config = state
        .sync_defaults
        .configuration(conferences, season_id, request.week);
    let result = state.sync_engine.full_sync(&config).await?;

    Ok((StatusCode::OK, axum::Json(result)).into_response())
}

/// Get whether a synchronization is running and how the last one went
#[utoipa::path(
    get,
    path = "/api/sync/state",
    tag = SYNC_TAG,
    responses(
        (status = 200, description = "State of the synchronization engine", body = SyncState),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_sync_state(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let sync_state = state.sync_engine.get_sync_state().await;

    Ok((StatusCode::OK, axum::Json(sync_state)).into_response())
}

/// Ask a running synchronization to stop at its next checkpoint
#[utoipa::path(
    post,
    path = "/api/sync/stop",
    tag = SYNC_TAG,
    responses(
        (status = 200, description = "Stop requested", body = SyncStopDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stop_sync(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let was_running = state.sync_engine.force_stop();

    Ok((StatusCode::OK, axum::Json(SyncStopDto { was_running })).into_response())
}
