//! Server startup: client construction, database connection and background services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::{conference::ConferenceRepository, season::SeasonRepository},
    error::Error,
    model::{
        app::{AppState, SyncDefaults},
        sync::ConferenceTarget,
    },
    service::{availability::AvailabilityService, sync::SyncEngine},
    source::FantasySource,
};

/// Build the Sleeper client from the configured base URL and user agent
pub fn build_sleeper_client(config: &Config) -> Result<sleeper_api::Client, Error> {
    let sleeper_client = sleeper_api::Client::builder()
        .base_url(&config.sleeper_api_url)
        .user_agent(&config.user_agent)
        .build()?;

    Ok(sleeper_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Wire the availability service and sync engine into the shared application state
pub fn build_app_state(
    config: &Config,
    db: DatabaseConnection,
    source: Arc<dyn FantasySource>,
) -> AppState {
    let availability = AvailabilityService::new(db.clone());
    let sync_engine = SyncEngine::new(db.clone(), source, Some(availability.clone()));

    AppState {
        db,
        sync_engine,
        availability,
        sync_defaults: SyncDefaults::from(config),
    }
}

/// Start the periodic sync of every conference in the current season
///
/// # Returns
/// - `Ok(true)` - Automatic sync scheduled
/// - `Ok(false)` - No current season or no conferences, nothing scheduled
pub async fn start_automatic_sync(config: &Config, state: &AppState) -> Result<bool, Error> {
    let Some(season) = SeasonRepository::new(&state.db).find_current().await? else {
        tracing::warn!("No current season configured, automatic sync not started");
        return Ok(false);
    };

    let conferences: Vec<ConferenceTarget> = ConferenceRepository::new(&state.db)
        .get_by_season(season.id)
        .await?
        .into_iter()
        .map(ConferenceTarget::from)
        .collect();

    if conferences.is_empty() {
        tracing::warn!(
            "Season {} has no conferences, automatic sync not started",
            season.id
        );
        return Ok(false);
    }

    let sync_config = state
        .sync_defaults
        .configuration(conferences, season.id, None);
    state
        .sync_engine
        .start_automatic_sync(sync_config, config.sync_interval)
        .await?;

    Ok(true)
}
