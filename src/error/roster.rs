use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum RosterError {
    /// The team does not currently roster the player, so the action cannot apply.
    #[error("Team {team_id} does not currently roster player {player_id} in season {season_id}")]
    NotRostered {
        team_id: i32,
        player_id: i32,
        season_id: i32,
    },
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
