use std::time::Duration;

use huddle::{
    error::{sync::SyncError, Error},
    model::sync::ConferenceTarget,
    service::sync::SyncEngine,
};

use super::*;
use crate::util::GatedSource;

fn north() -> ConferenceTarget {
    ConferenceTarget {
        id: 1,
        external_league_id: "L1".to_string(),
        name: "North".to_string(),
    }
}

/// Expect a second sync to be rejected while the first is running
#[tokio::test]
async fn rejects_second_sync_while_running() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let source = GatedSource::new();
    let engine = SyncEngine::new(test.db.clone(), source.clone(), None);
    let config = test.sync_configuration(Vec::new());

    let running = tokio::spawn({
        let engine = engine.clone();
        let config = config.clone();
        async move { engine.full_sync(&config).await }
    });
    source.wait_until_entered().await;

    assert!(engine.is_running());
    let second = engine.full_sync(&config).await;
    assert!(matches!(
        second,
        Err(Error::SyncError(SyncError::SyncInProgress))
    ));

    source.release();
    let first = running.await.unwrap();
    assert!(first.is_ok());
    assert!(!engine.is_running());

    Ok(())
}

/// Expect a stop request to end the run before the next conference
#[tokio::test]
async fn force_stop_ends_run_before_next_conference() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let source = GatedSource::new();
    let engine = SyncEngine::new(test.db.clone(), source.clone(), None);
    let config = test.sync_configuration(vec![north()]);

    let running = tokio::spawn({
        let engine = engine.clone();
        async move { engine.full_sync(&config).await }
    });
    source.wait_until_entered().await;

    assert!(engine.force_stop());
    source.release();

    let result = running.await.unwrap().unwrap();
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e.contains("stopped")));
    assert_eq!(source.roster_calls(), 0);

    // Nothing left to stop
    assert!(!engine.force_stop());

    Ok(())
}

/// Expect the automatic schedule to run immediately and to be cancellable
#[tokio::test]
async fn automatic_sync_runs_immediately_and_stops() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let source = GatedSource::new();
    let engine = SyncEngine::new(test.db.clone(), source.clone(), None);

    engine
        .start_automatic_sync(test.sync_configuration(Vec::new()), Duration::from_secs(3600))
        .await
        .unwrap();
    source.wait_until_entered().await;

    let state = engine.get_sync_state().await;
    assert!(state.is_automatic);
    assert!(state.is_running);

    engine.stop_automatic_sync().await.unwrap();
    assert!(!engine.get_sync_state().await.is_automatic);

    source.release();

    Ok(())
}
