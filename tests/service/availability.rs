use entity::sea_orm_active_enums::{AvailabilityStatus, RosterStatus};
use huddle::{model::availability::AvailabilityFilter, service::availability::AvailabilityService};

use super::*;

/// Records inserted for a player rostered by one team of one conference.
struct Owned {
    conference: entity::conference::Model,
    team: entity::team::Model,
    player: entity::player::Model,
}

async fn insert_owned_player(test: &TestContext, week: i32) -> Result<Owned, TestError> {
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let team = test.league().insert_team("North A").await?;
    test.league()
        .insert_junction(team.id, conference.id, Some(1), true)
        .await?;
    let player = test.league().insert_player("42", "RB", Some("SF")).await?;
    test.league()
        .insert_roster_entry(
            team.id,
            player.id,
            conference.id,
            TEST_SEASON_ID,
            week,
            RosterStatus::Bench,
        )
        .await?;

    Ok(Owned {
        conference,
        team,
        player,
    })
}

/// Expect a benched player to be reported as owned by their team
#[tokio::test]
async fn reports_owner_of_rostered_player() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let owned = insert_owned_player(&test, TEST_WEEK - 2).await?;

    let service = AvailabilityService::new(test.db.clone());
    let record = service
        .calculate_availability(owned.player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();

    assert!(!record.is_available);
    assert_eq!(record.owned_by_team_id, Some(owned.team.id));
    assert_eq!(record.owned_by_conference_id, Some(owned.conference.id));
    assert_eq!(record.roster_status, AvailabilityStatus::Bench);
    assert_eq!(record.conference_id, None);

    Ok(())
}

/// Expect a player nobody rosters to be a free agent
#[tokio::test]
async fn unrostered_player_is_free_agent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let player = test.league().insert_player("7", "TE", None).await?;

    let service = AvailabilityService::new(test.db.clone());
    let record = service
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();

    assert!(record.is_available);
    assert_eq!(record.owned_by_team_id, None);
    assert_eq!(record.roster_status, AvailabilityStatus::FreeAgent);

    Ok(())
}

/// Expect entries added after the requested week not to count
#[tokio::test]
async fn ignores_entries_after_requested_week() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let owned = insert_owned_player(&test, TEST_WEEK + 2).await?;

    let service = AvailabilityService::new(test.db.clone());
    let record = service
        .calculate_availability(owned.player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();

    assert!(record.is_available);

    Ok(())
}

/// Expect ownership in one conference not to affect availability in another
#[tokio::test]
async fn conference_lookup_is_scoped() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let owned = insert_owned_player(&test, TEST_WEEK).await?;
    let other = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L2", "South")
        .await?;

    let service = AvailabilityService::new(test.db.clone());
    let in_owner_conference = service
        .calculate_conference_availability(
            owned.conference.id,
            owned.player.id,
            TEST_SEASON_ID,
            TEST_WEEK,
            false,
        )
        .await
        .unwrap();
    let in_other_conference = service
        .calculate_conference_availability(
            other.id,
            owned.player.id,
            TEST_SEASON_ID,
            TEST_WEEK,
            false,
        )
        .await
        .unwrap();

    assert!(!in_owner_conference.is_available);
    assert_eq!(in_owner_conference.conference_id, Some(owned.conference.id));
    assert!(in_other_conference.is_available);

    Ok(())
}

/// Expect a cached record to be served until a refresh is forced
#[tokio::test]
async fn serves_cached_record_until_forced() -> Result<(), TestError> {
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

    let service = AvailabilityService::new(test.db.clone());
    let before = service
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();
    assert!(before.is_available);

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

    let cached = service
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();
    assert!(cached.is_available);

    let forced = service
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, true)
        .await
        .unwrap();
    assert!(!forced.is_available);
    assert_eq!(forced.roster_status, AvailabilityStatus::Active);

    Ok(())
}

/// Expect statistics to split the filtered player pool into available and owned
#[tokio::test]
async fn stats_count_available_and_owned_players() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    insert_owned_player(&test, TEST_WEEK).await?;
    test.league().insert_player("7", "TE", None).await?;
    test.league().insert_player("8", "QB", Some("KC")).await?;

    let service = AvailabilityService::new(test.db.clone());
    let stats = service
        .get_availability_stats(TEST_SEASON_ID, TEST_WEEK, &AvailabilityFilter::default())
        .await
        .unwrap();

    assert_eq!(stats.overall.total, 3);
    assert_eq!(stats.overall.available, 2);
    assert_eq!(stats.overall.owned, 1);
    assert_eq!(stats.by_position["RB"].owned, 1);
    assert_eq!(stats.by_nfl_team["FA"].available, 1);

    let quarterbacks = service
        .get_availability_stats(
            TEST_SEASON_ID,
            TEST_WEEK,
            &AvailabilityFilter {
                positions: vec!["QB".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(quarterbacks.overall.total, 1);
    assert_eq!(quarterbacks.overall.available, 1);

    Ok(())
}

/// Expect two teams of one conference owning a player to be reported
#[tokio::test]
async fn reports_same_conference_multi_ownership() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let owned = insert_owned_player(&test, TEST_WEEK).await?;
    let rival = test.league().insert_team("North B").await?;
    test.league()
        .insert_roster_entry(
            rival.id,
            owned.player.id,
            owned.conference.id,
            TEST_SEASON_ID,
            TEST_WEEK,
            RosterStatus::Active,
        )
        .await?;

    let service = AvailabilityService::new(test.db.clone());
    let conflicts = service
        .find_conflicting_ownership(TEST_SEASON_ID, TEST_WEEK, Default::default())
        .await
        .unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].player_id, owned.player.id);
    assert!(conflicts[0].same_conference);
    assert_eq!(conflicts[0].owners.len(), 2);

    Ok(())
}
