//! Sleeper snapshots with standard test values.

use sleeper_api::model::{LeagueUser, Player, Roster, RosterSettings};

/// Create a catalog entry for an active player.
///
/// # Arguments
/// - `player_id` - Sleeper player id
/// - `position` - Position, e.g. `"QB"`
/// - `team` - NFL team abbreviation, `None` for free agents of the league
pub fn mock_player(player_id: &str, position: &str, team: Option<&str>) -> Player {
    Player {
        player_id: player_id.to_string(),
        full_name: Some(format!("Player {}", player_id)),
        position: Some(position.to_string()),
        team: team.map(str::to_string),
        status: Some("Active".to_string()),
        age: Some(26),
        years_exp: Some(4),
        fantasy_positions: Some(vec![position.to_string()]),
        ..Default::default()
    }
}

/// Create a roster holding `players`, the first of which start.
///
/// # Arguments
/// - `roster_id` - Roster id within the league
/// - `owner_id` - Sleeper user id of the owner
/// - `players` - Every player on the roster
/// - `starters` - Number of leading `players` placed in starter slots
pub fn mock_roster(roster_id: i32, owner_id: &str, players: &[&str], starters: usize) -> Roster {
    Roster {
        roster_id,
        owner_id: Some(owner_id.to_string()),
        league_id: String::new(),
        players: Some(players.iter().map(|id| id.to_string()).collect()),
        starters: Some(
            players
                .iter()
                .take(starters)
                .map(|id| id.to_string())
                .collect(),
        ),
        reserve: None,
        taxi: None,
        settings: RosterSettings {
            wins: 6,
            losses: 3,
            fpts: 1024,
            fpts_decimal: Some(50),
            fpts_against: Some(980),
            waiver_position: Some(roster_id),
            ..Default::default()
        },
    }
}

/// Create a league member.
pub fn mock_user(user_id: &str, display_name: &str) -> LeagueUser {
    LeagueUser {
        user_id: user_id.to_string(),
        display_name: Some(display_name.to_string()),
        metadata: None,
    }
}
