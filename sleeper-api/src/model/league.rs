use serde::{Deserialize, Serialize};

/// A team's roster within one league (`GET /league/{league_id}/rosters`).
///
/// `players` is the full roster; `starters`, `reserve` (injured reserve) and
/// `taxi` are subsets of it. Sleeper sends `null` for empty slot lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: i32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub league_id: String,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub reserve: Option<Vec<String>>,
    #[serde(default)]
    pub taxi: Option<Vec<String>>,
    #[serde(default)]
    pub settings: RosterSettings,
}

impl Roster {
    pub fn player_ids(&self) -> &[String] {
        self.players.as_deref().unwrap_or_default()
    }

    pub fn starter_ids(&self) -> &[String] {
        self.starters.as_deref().unwrap_or_default()
    }

    pub fn reserve_ids(&self) -> &[String] {
        self.reserve.as_deref().unwrap_or_default()
    }

    pub fn taxi_ids(&self) -> &[String] {
        self.taxi.as_deref().unwrap_or_default()
    }
}

/// Standings and waiver settings attached to a roster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub ties: i32,
    #[serde(default)]
    pub fpts: i32,
    #[serde(default)]
    pub fpts_decimal: Option<i32>,
    #[serde(default)]
    pub fpts_against: Option<i32>,
    #[serde(default)]
    pub fpts_against_decimal: Option<i32>,
    #[serde(default)]
    pub waiver_position: Option<i32>,
}

impl RosterSettings {
    /// Points scored, combining Sleeper's integer and hundredths fields.
    pub fn points_for(&self) -> f64 {
        combine_points(self.fpts, self.fpts_decimal.unwrap_or(0))
    }

    /// Points allowed, combining Sleeper's integer and hundredths fields.
    pub fn points_against(&self) -> f64 {
        combine_points(
            self.fpts_against.unwrap_or(0),
            self.fpts_against_decimal.unwrap_or(0),
        )
    }
}

fn combine_points(whole: i32, hundredths: i32) -> f64 {
    whole as f64 + hundredths as f64 / 100.0
}

/// A member of a league (`GET /league/{league_id}/users`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<LeagueUserMetadata>,
}

impl LeagueUser {
    /// Custom team name if the user set one.
    pub fn team_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueUserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// One roster's side of a weekly matchup (`GET /league/{league_id}/matchups/{week}`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub roster_id: i32,
    #[serde(default)]
    pub matchup_id: Option<i32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
}
