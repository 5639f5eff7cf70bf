//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! Holds an in-memory SQLite database, a mock Sleeper server and a client pointed at it.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_USER_AGENT, error::TestError};

/// Test environment with database, mock server and Sleeper client.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_store_tables().build().await?;
///
/// let season = test.league().insert_season(2024, true).await?;
/// let source: Arc<dyn FantasySource> = Arc::new(test.sleeper_client.clone());
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Sleeper client configured to use the mock server
    pub sleeper_client: sleeper_api::Client,

    /// Mock HTTP server for Sleeper endpoints
    pub(crate) server: ServerGuard,
    /// Mock endpoints checked by [`assert_mocks`](Self::assert_mocks)
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Creates a context with an empty database and no mock endpoints.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let sleeper_client = sleeper_api::Client::builder()
            .base_url(&server.url())
            .user_agent(TEST_USER_AGENT)
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            sleeper_client,
            server,
            mocks: Vec::new(),
        })
    }

    /// Executes CREATE TABLE statements queued by the builder.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
