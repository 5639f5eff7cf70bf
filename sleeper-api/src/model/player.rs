use serde::{Deserialize, Serialize};

/// Entry of the NFL player catalog (`GET /players/nfl`).
///
/// The catalog is keyed by `player_id`; most descriptive fields are missing for
/// team defenses and long-retired players, hence the liberal use of `Option`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub years_exp: Option<i32>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
}

impl Player {
    /// Display name, falling back to "first last" and finally the player id.
    pub fn display_name(&self) -> String {
        if let Some(full_name) = self.full_name.as_ref().filter(|n| !n.is_empty()) {
            return full_name.clone();
        }

        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.player_id.clone(),
        }
    }
}
