use crate::{
    client::Client,
    error::Error,
    model::{LeagueUser, Matchup, Roster},
};

/// League-scoped endpoints.
pub struct LeagueEndpoints<'a> {
    client: &'a Client,
}

impl<'a> LeagueEndpoints<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches every roster of a league.
    pub async fn get_rosters(&self, league_id: &str) -> Result<Vec<Roster>, Error> {
        self.client
            .get_json(&format!("/league/{}/rosters", league_id))
            .await
    }

    /// Fetches the members of a league.
    pub async fn get_users(&self, league_id: &str) -> Result<Vec<LeagueUser>, Error> {
        self.client
            .get_json(&format!("/league/{}/users", league_id))
            .await
    }

    /// Fetches the matchups of a league for one week.
    pub async fn get_matchups(&self, league_id: &str, week: i32) -> Result<Vec<Matchup>, Error> {
        self.client
            .get_json(&format!("/league/{}/matchups/{}", league_id, week))
            .await
    }
}
