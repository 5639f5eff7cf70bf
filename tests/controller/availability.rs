use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::sea_orm_active_enums::RosterStatus;
use huddle::{
    controller::availability::{
        get_availability_stats, get_ownership_conflicts, get_player_availability,
    },
    model::{
        api::{AvailabilityQuery, AvailabilityStatsQuery, OwnershipConflictQuery},
        availability::{AvailabilityRecord, AvailabilityStats, OwnershipConflict, OwnershipPolicy},
    },
};

use super::*;

/// Expect 200 OK with the owning team of a rostered player
#[tokio::test]
async fn returns_owner_of_player() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let team = test.league().insert_team("North A").await?;
    let player = test.league().insert_player("42", "RB", Some("SF")).await?;
    test.league()
        .insert_roster_entry(
            team.id,
            player.id,
            conference.id,
            TEST_SEASON_ID,
            TEST_WEEK,
            RosterStatus::Active,
        )
        .await?;

    let result = get_player_availability(
        State(test.into_app_state()),
        Path((TEST_SEASON_ID, TEST_WEEK, player.id)),
        Query(AvailabilityQuery {
            conference_id: Some(conference.id),
            force_refresh: false,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let record: AvailabilityRecord = json_body(resp).await;
    assert!(!record.is_available);
    assert_eq!(record.owned_by_team_id, Some(team.id));
    assert_eq!(record.conference_id, Some(conference.id));

    Ok(())
}

/// Expect 200 OK with statistics narrowed by the comma-separated position filter
#[tokio::test]
async fn returns_filtered_stats() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    test.league().insert_player("1", "QB", Some("KC")).await?;
    test.league().insert_player("2", "RB", Some("SF")).await?;
    test.league().insert_player("3", "WR", Some("DAL")).await?;

    let result = get_availability_stats(
        State(test.into_app_state()),
        Path((TEST_SEASON_ID, TEST_WEEK)),
        Query(AvailabilityStatsQuery {
            positions: Some("QB,RB".to_string()),
            ..Default::default()
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: AvailabilityStats = json_body(resp).await;
    assert_eq!(stats.overall.total, 2);
    assert_eq!(stats.overall.available, 2);
    assert!(!stats.by_position.contains_key("WR"));

    Ok(())
}

/// Expect cross-conference ownership to be listed only when requested
#[tokio::test]
async fn lists_cross_conference_conflicts_on_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let north = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let south = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L2", "South")
        .await?;
    let north_team = test.league().insert_team("North A").await?;
    let south_team = test.league().insert_team("South A").await?;
    let player = test.league().insert_player("42", "RB", Some("SF")).await?;
    for (team_id, conference_id) in [(north_team.id, north.id), (south_team.id, south.id)] {
        test.league()
            .insert_roster_entry(
                team_id,
                player.id,
                conference_id,
                TEST_SEASON_ID,
                TEST_WEEK,
                RosterStatus::Bench,
            )
            .await?;
    }
    let state = test.into_app_state();

    let default_policy = get_ownership_conflicts(
        State(state.clone()),
        Path((TEST_SEASON_ID, TEST_WEEK)),
        Query(OwnershipConflictQuery::default()),
    )
    .await
    .unwrap()
    .into_response();
    let conflicts: Vec<OwnershipConflict> = json_body(default_policy).await;
    assert!(conflicts.is_empty());

    let flagged = get_ownership_conflicts(
        State(state),
        Path((TEST_SEASON_ID, TEST_WEEK)),
        Query(OwnershipConflictQuery {
            policy: Some(OwnershipPolicy::FlagCrossConference),
        }),
    )
    .await
    .unwrap()
    .into_response();
    let conflicts: Vec<OwnershipConflict> = json_body(flagged).await;
    assert_eq!(conflicts.len(), 1);
    assert!(!conflicts[0].same_conference);

    Ok(())
}
