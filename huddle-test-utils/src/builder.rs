//! Declarative test builder.
//!
//! Configuration methods queue tables, fixtures and mock endpoints; everything is created
//! by the final [`TestBuilder::build`] call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use sleeper_api::model::{LeagueUser, Player, Roster};

use crate::{constant::TEST_SEASON_ID, error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_store_tables: bool,

    current_season: bool,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    players_endpoints: Vec<(Vec<Player>, usize)>,
    rosters_endpoints: Vec<(String, Vec<Roster>, usize)>,
    users_endpoints: Vec<(String, Vec<LeagueUser>, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_store_tables: false,
            current_season: false,
            mock_builders: Vec::new(),
            players_endpoints: Vec::new(),
            rosters_endpoints: Vec::new(),
            users_endpoints: Vec::new(),
        }
    }

    /// Create every table of the store.
    pub fn with_store_tables(mut self) -> Self {
        self.include_store_tables = true;
        self
    }

    /// Create the table of a single entity.
    ///
    /// ```no_run
    /// use huddle_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), huddle_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Player)
    ///     .with_table(RosterEntry)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert season [`TEST_SEASON_ID`] marked as current.
    pub fn with_current_season(mut self) -> Self {
        self.current_season = true;
        self
    }

    /// Serve `players` from `/players/nfl`, expecting `expected_requests` calls.
    pub fn with_players_endpoint(
        mut self,
        players: Vec<Player>,
        expected_requests: usize,
    ) -> Self {
        self.players_endpoints.push((players, expected_requests));
        self
    }

    /// Serve `rosters` from `/league/{league_id}/rosters`.
    pub fn with_rosters_endpoint(
        mut self,
        league_id: &str,
        rosters: Vec<Roster>,
        expected_requests: usize,
    ) -> Self {
        self.rosters_endpoints
            .push((league_id.to_string(), rosters, expected_requests));
        self
    }

    /// Serve `users` from `/league/{league_id}/users`.
    pub fn with_users_endpoint(
        mut self,
        league_id: &str,
        users: Vec<LeagueUser>,
        expected_requests: usize,
    ) -> Self {
        self.users_endpoints
            .push((league_id.to_string(), users, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// Creates tables, then fixtures, then mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    /// - `Err(TestError::SleeperError)` - Sleeper client construction failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut ctx = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_store_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Season),
                schema.create_table_from_entity(entity::prelude::Conference),
                schema.create_table_from_entity(entity::prelude::Team),
                schema.create_table_from_entity(entity::prelude::TeamConference),
                schema.create_table_from_entity(entity::prelude::Player),
                schema.create_table_from_entity(entity::prelude::RosterEntry),
                schema.create_table_from_entity(entity::prelude::RosterHistory),
                schema.create_table_from_entity(entity::prelude::TeamSeason),
                schema.create_table_from_entity(entity::prelude::AvailabilityCache),
                schema.create_table_from_entity(entity::prelude::SyncStatus),
                schema.create_table_from_entity(entity::prelude::CacheSnapshot),
            ]);
        }

        all_tables.extend(self.tables);
        ctx.with_tables(all_tables).await?;

        // 2. Insert fixtures
        if self.current_season {
            ctx.league().insert_season(TEST_SEASON_ID, true).await?;
        }

        // 3. Create mock endpoints, custom ones first so tests can queue an error
        // response ahead of a success for the same path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut ctx.server));
        }

        for (players, expected) in self.players_endpoints {
            mocks.push(ctx.sleeper().create_players_endpoint(players, expected));
        }

        for (league_id, rosters, expected) in self.rosters_endpoints {
            mocks.push(
                ctx.sleeper()
                    .create_rosters_endpoint(&league_id, rosters, expected),
            );
        }

        for (league_id, users, expected) in self.users_endpoints {
            mocks.push(ctx.sleeper().create_users_endpoint(&league_id, users, expected));
        }

        ctx.mocks = mocks;

        Ok(ctx)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
