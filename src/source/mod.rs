//! External fantasy data source.
//!
//! The engine talks to the platform only through [`FantasySource`]. Implementations are
//! stateless and perform exactly one request per call: retries and caching belong to the
//! callers (`RetryContext` and the cache layer).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::Error,
    model::source::{LeagueUserSnapshot, MatchupSnapshot, PlayerSnapshot, RosterSnapshot},
};

/// Read-only access to player, roster, user and matchup snapshots.
#[async_trait]
pub trait FantasySource: Send + Sync {
    /// Full player catalog keyed by external player id.
    async fn fetch_all_players(&self) -> Result<HashMap<String, PlayerSnapshot>, Error>;

    /// Every roster of a league.
    async fn fetch_league_rosters(&self, league_id: &str) -> Result<Vec<RosterSnapshot>, Error>;

    /// Matchups of a league for one week.
    async fn fetch_matchups(
        &self,
        league_id: &str,
        week: i32,
    ) -> Result<Vec<MatchupSnapshot>, Error>;

    /// Members of a league.
    async fn fetch_league_users(&self, league_id: &str)
        -> Result<Vec<LeagueUserSnapshot>, Error>;
}

#[async_trait]
impl FantasySource for sleeper_api::Client {
    async fn fetch_all_players(&self) -> Result<HashMap<String, PlayerSnapshot>, Error> {
        Ok(self.players().get_all_players().await?)
    }

    async fn fetch_league_rosters(&self, league_id: &str) -> Result<Vec<RosterSnapshot>, Error> {
        Ok(self.league().get_rosters(league_id).await?)
    }

    async fn fetch_matchups(
        &self,
        league_id: &str,
        week: i32,
    ) -> Result<Vec<MatchupSnapshot>, Error> {
        Ok(self.league().get_matchups(league_id, week).await?)
    }

    async fn fetch_league_users(
        &self,
        league_id: &str,
    ) -> Result<Vec<LeagueUserSnapshot>, Error> {
        Ok(self.league().get_users(league_id).await?)
    }
}
