use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use huddle::{model::availability::AvailabilityStats, router};
use tower::ServiceExt;

use super::*;

/// Expect the stats route to be reachable through the assembled router
#[tokio::test]
async fn routes_availability_stats() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    test.league().insert_player("1", "QB", Some("KC")).await?;
    let app = router::routes().with_state(test.into_app_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/availability/{}/{}/stats?positions=QB",
                    TEST_SEASON_ID, TEST_WEEK
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: AvailabilityStats = json_body(resp).await;
    assert_eq!(stats.overall.total, 1);

    Ok(())
}

/// Expect the OpenAPI document to list every API path
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let document: serde_json::Value = json_body(resp).await;
    let paths = document["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/sync"));
    assert!(paths.contains_key("/api/integrity/audit"));
    assert!(paths.contains_key("/api/conferences/{conference_id}/rosters"));
    assert!(paths.contains_key("/api/availability/{season_id}/{week}/{player_id}"));

    Ok(())
}
