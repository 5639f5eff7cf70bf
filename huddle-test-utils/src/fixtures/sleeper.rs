//! Sleeper HTTP mock endpoint creation utilities.
//!
//! Endpoints are registered with the context's mockito server and verify they were
//! called the expected number of times.

use std::collections::HashMap;

use mockito::Mock;
use sleeper_api::model::{LeagueUser, Player, Roster};

use crate::TestContext;

impl TestContext {
    pub fn sleeper(&mut self) -> SleeperFixtures<'_> {
        SleeperFixtures { ctx: self }
    }
}

pub struct SleeperFixtures<'a> {
    pub ctx: &'a mut TestContext,
}

impl<'a> SleeperFixtures<'a> {
    /// Create a mock endpoint at `/players/nfl` serving `players` keyed by player id.
    pub fn create_players_endpoint(
        &mut self,
        players: Vec<Player>,
        expected_requests: usize,
    ) -> Mock {
        let catalog: HashMap<String, Player> = players
            .into_iter()
            .map(|player| (player.player_id.clone(), player))
            .collect();

        self.ctx
            .server
            .mock("GET", "/players/nfl")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&catalog).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint at `/league/{league_id}/rosters`.
    pub fn create_rosters_endpoint(
        &mut self,
        league_id: &str,
        rosters: Vec<Roster>,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/league/{}/rosters", league_id);

        self.ctx
            .server
            .mock("GET", url.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&rosters).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint at `/league/{league_id}/users`.
    pub fn create_users_endpoint(
        &mut self,
        league_id: &str,
        users: Vec<LeagueUser>,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/league/{}/users", league_id);

        self.ctx
            .server
            .mock("GET", url.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&users).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint at `path` answering with an empty body and `status`.
    pub fn create_error_endpoint(
        &mut self,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.ctx
            .server
            .mock("GET", path)
            .with_status(status)
            .expect(expected_requests)
            .create()
    }
}
