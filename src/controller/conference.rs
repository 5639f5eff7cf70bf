use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    data::{conference::ConferenceRepository, team_conference::TeamConferenceRepository},
    error::Error,
    model::{
        api::{ConferenceRostersDto, ErrorDto, RosterDto},
        app::AppState,
    },
};

pub static CONFERENCE_TAG: &str = "conference";

/// Get the Sleeper rosters of a conference
///
/// Rosters come from the roster cache and may trail Sleeper by a few minutes; a stale
/// read starts a background refresh. Each roster is paired with the team its roster id
/// maps to.
#[utoipa::path(
    get,
    path = "/api/conferences/{conference_id}/rosters",
    tag = CONFERENCE_TAG,
    params(
        ("conference_id" = i32, Path, description = "Internal conference id"),
    ),
    responses(
        (status = 200, description = "Rosters of the conference", body = ConferenceRostersDto),
        (status = 404, description = "Conference not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_conference_rosters(
    State(state): State<AppState>,
    Path(conference_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let Some(conference) = ConferenceRepository::new(&state.db)
        .find_by_id(conference_id)
        .await?
    else {
        return Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: format!("Conference {} not found", conference_id),
            }),
        )
            .into_response());
    };

    let read = state
        .sync_engine
        .roster_cache()
        .get(&conference.external_league_id)
        .await?;

    let teams: HashMap<i32, i32> = TeamConferenceRepository::new(&state.db)
        .get_active_by_conference(conference.id)
        .await?
        .into_iter()
        .filter_map(|junction| {
            junction
                .external_roster_id
                .map(|roster_id| (roster_id, junction.team_id))
        })
        .collect();

    let rosters = read
        .value
        .iter()
        .map(|roster| RosterDto::new(roster, teams.get(&roster.roster_id).copied()))
        .collect();

    Ok((
        StatusCode::OK,
        axum::Json(ConferenceRostersDto {
            conference_id: conference.id,
            league_id: conference.external_league_id,
            cache_source: read.source,
            rosters,
        }),
    )
        .into_response())
}
