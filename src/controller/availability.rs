use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Error,
    model::{
        api::{AvailabilityQuery, AvailabilityStatsQuery, ErrorDto, OwnershipConflictQuery},
        app::AppState,
        availability::{AvailabilityFilter, AvailabilityRecord, AvailabilityStats, OwnershipConflict},
    },
};

pub static AVAILABILITY_TAG: &str = "availability";

/// Get whether a player can be acquired in a season and week
///
/// Without `conference_id` the player is looked up across every conference and reported
/// as owned if any team holds them.
#[utoipa::path(
    get,
    path = "/api/availability/{season_id}/{week}/{player_id}",
    tag = AVAILABILITY_TAG,
    params(
        ("season_id" = i32, Path, description = "Season id"),
        ("week" = i32, Path, description = "Week of the season"),
        ("player_id" = i32, Path, description = "Internal player id"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability of the player", body = AvailabilityRecord),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_player_availability(
    State(state): State<AppState>,
    Path((season_id, week, player_id)): Path<(i32, i32, i32)>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
    let record = match query.conference_id {
        Some(conference_id) => {
            state
                .availability
                .calculate_conference_availability(
                    conference_id,
                    player_id,
                    season_id,
                    week,
                    query.force_refresh,
                )
                .await?
        }
        None => {
            state
                .availability
                .calculate_availability(player_id, season_id, week, query.force_refresh)
                .await?
        }
    };

    Ok((StatusCode::OK, axum::Json(record)).into_response())
}

/// Get available/owned counts of the player pool for a season and week
#[utoipa::path(
    get,
    path = "/api/availability/{season_id}/{week}/stats",
    tag = AVAILABILITY_TAG,
    params(
        ("season_id" = i32, Path, description = "Season id"),
        ("week" = i32, Path, description = "Week of the season"),
        AvailabilityStatsQuery
    ),
    responses(
        (status = 200, description = "Aggregated availability", body = AvailabilityStats),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_availability_stats(
    State(state): State<AppState>,
    Path((season_id, week)): Path<(i32, i32)>,
    Query(query): Query<AvailabilityStatsQuery>,
) -> Result<impl IntoResponse, Error> {
    let filter = AvailabilityFilter::from(query);
    let stats = state
        .availability
        .get_availability_stats(season_id, week, &filter)
        .await?;

    Ok((StatusCode::OK, axum::Json(stats)).into_response())
}

/// Get players currently owned by more than one team
#[utoipa::path(
    get,
    path = "/api/availability/{season_id}/{week}/conflicts",
    tag = AVAILABILITY_TAG,
    params(
        ("season_id" = i32, Path, description = "Season id"),
        ("week" = i32, Path, description = "Week of the season"),
        OwnershipConflictQuery
    ),
    responses(
        (status = 200, description = "Players with more than one owner", body = Vec<OwnershipConflict>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ownership_conflicts(
    State(state): State<AppState>,
    Path((season_id, week)): Path<(i32, i32)>,
    Query(query): Query<OwnershipConflictQuery>,
) -> Result<impl IntoResponse, Error> {
    let conflicts = state
        .availability
        .find_conflicting_ownership(season_id, week, query.policy.unwrap_or_default())
        .await?;

    Ok((StatusCode::OK, axum::Json(conflicts)).into_response())
}
