use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    model::{
        availability::{AvailabilityFilter, OwnershipPolicy},
        source::RosterSnapshot,
    },
    service::cache::CacheSource,
};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Query parameters of a single player's availability lookup
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Restrict the lookup to one conference
    pub conference_id: Option<i32>,
    /// Bypass the cache and recompute from roster state
    #[serde(default)]
    pub force_refresh: bool,
}

/// Query parameters of the availability statistics endpoint
///
/// List parameters are comma separated, e.g. `positions=QB,RB`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityStatsQuery {
    pub positions: Option<String>,
    pub nfl_teams: Option<String>,
    pub injury_statuses: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_years_exp: Option<i32>,
    pub max_years_exp: Option<i32>,
    pub conference_id: Option<i32>,
}

impl From<AvailabilityStatsQuery> for AvailabilityFilter {
    fn from(query: AvailabilityStatsQuery) -> Self {
        Self {
            positions: split_list(query.positions.as_deref()),
            nfl_teams: split_list(query.nfl_teams.as_deref()),
            injury_statuses: split_list(query.injury_statuses.as_deref()),
            min_age: query.min_age,
            max_age: query.max_age,
            min_years_exp: query.min_years_exp,
            max_years_exp: query.max_years_exp,
            conference_id: query.conference_id,
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Query parameters of the ownership conflict endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnershipConflictQuery {
    #[param(value_type = Option<String>)]
    pub policy: Option<OwnershipPolicy>,
}

/// Request body of a manually triggered synchronization
#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncRequestDto {
    /// Season to synchronize, defaults to the current season
    pub season_id: Option<i32>,
    /// Week to synchronize, defaults to the configured week
    pub week: Option<i32>,
}

/// Acknowledgement of a stop request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncStopDto {
    /// Whether a synchronization was running when the stop was requested
    pub was_running: bool,
}


/// One Sleeper roster of a conference and the team it maps to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RosterDto {
    /// Roster id within the Sleeper league
    pub roster_id: i32,
    /// Internal team the roster id maps to through an active junction
    pub team_id: Option<i32>,
    pub owner_id: Option<String>,
    /// External ids of every rostered player
    pub players: Vec<String>,
    pub starters: Vec<String>,
    pub reserve: Vec<String>,
    pub taxi: Vec<String>,
}

impl RosterDto {
    pub fn new(roster: &RosterSnapshot, team_id: Option<i32>) -> Self {
        Self {
            roster_id: roster.roster_id,
            team_id,
            owner_id: roster.owner_id.clone(),
            players: roster.player_ids().to_vec(),
            starters: roster.starter_ids().to_vec(),
            reserve: roster.reserve_ids().to_vec(),
            taxi: roster.taxi_ids().to_vec(),
        }
    }
}

/// Cached rosters of a conference
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConferenceRostersDto {
    pub conference_id: i32,
    /// Sleeper league id of the conference
    pub league_id: String,
    /// Whether the rosters were fresh, stale or loaded for this request
    pub cache_source: CacheSource,
    pub rosters: Vec<RosterDto>,
}
