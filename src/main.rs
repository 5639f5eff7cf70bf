use std::sync::Arc;

use huddle::{
    config::Config,
    router,
    scheduler::{self, JobContext},
    startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let sleeper_client = startup::build_sleeper_client(&config)?;
    let db = startup::connect_to_database(&config).await?;
    let state = startup::build_app_state(&config, db.clone(), Arc::new(sleeper_client));

    startup::start_automatic_sync(&config, &state).await?;
    let mut sched = scheduler::start_scheduler(JobContext {
        db,
        rosters: state.sync_engine.roster_cache().clone(),
    })
    .await?;

    let sync_engine = state.sync_engine.clone();
    let app = router::routes().with_state(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    tracing::info!("Shutting down");
    sync_engine.force_stop();
    sync_engine.stop_automatic_sync().await?;
    sched.shutdown().await?;

    Ok(())
}
