use axum::{extract::State, http::StatusCode, response::IntoResponse};
use huddle::{
    controller::sync::{get_sync_state, run_sync, stop_sync},
    model::{
        api::{SyncRequestDto, SyncStopDto},
        sync::{SyncResult, SyncState},
    },
};

use super::*;

/// Expect 200 OK with the result of a sync of the current season's conferences
#[tokio::test]
async fn syncs_current_season() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(vec![factory::mock_player("100", "RB", Some("SF"))], 1)
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_users_endpoint("L1", vec![factory::mock_user("u1", "Alice")], 1)
        .build()
        .await?;
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let team = test.league().insert_team("North A").await?;
    test.league()
        .insert_junction(team.id, conference.id, Some(1), true)
        .await?;
    let state = test.into_app_state();

    let result = run_sync(
        State(state.clone()),
        axum::Json(SyncRequestDto {
            season_id: None,
            week: None,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let sync_result: SyncResult = json_body(resp).await;
    assert!(sync_result.success, "unexpected errors: {:?}", sync_result.errors);
    assert_eq!(sync_result.records_processed, 2);

    let resp = get_sync_state(State(state)).await.unwrap().into_response();
    let sync_state: SyncState = json_body(resp).await;
    assert!(!sync_state.is_running);
    assert_eq!(sync_state.last_result, Some(sync_result));
    assert!(sync_state.last_sync_at.is_some());

    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found when no season is current and none was requested
#[tokio::test]
async fn not_found_without_current_season() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = run_sync(
        State(test.into_app_state()),
        axum::Json(SyncRequestDto {
            season_id: None,
            week: None,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 404 Not Found when the season has no conferences
#[tokio::test]
async fn not_found_without_conferences() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;

    let result = run_sync(
        State(test.into_app_state()),
        axum::Json(SyncRequestDto {
            season_id: Some(TEST_SEASON_ID),
            week: Some(TEST_WEEK),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect a stop request without a running sync to report so
#[tokio::test]
async fn stop_reports_idle_engine() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    let result = stop_sync(State(test.into_app_state())).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SyncStopDto = json_body(resp).await;
    assert!(!body.was_running);

    Ok(())
}
