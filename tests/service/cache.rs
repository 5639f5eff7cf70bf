use entity::sea_orm_active_enums::RosterStatus;
use huddle::service::{
    availability::AvailabilityService,
    cache::{roster::ConferenceRosterCache, CacheSource},
};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Expect a second roster cache on the same store to rehydrate instead of fetching
#[tokio::test]
async fn roster_cache_rehydrates_from_mirror() -> Result<(), TestError> {
    let rosters = vec![
        factory::mock_roster(1, "u1", &["100", "101"], 1),
        factory::mock_roster(2, "u2", &["200"], 1),
    ];
    let test = TestBuilder::new()
        .with_store_tables()
        .with_rosters_endpoint("L1", rosters, 1)
        .build()
        .await?;

    let first = ConferenceRosterCache::with_mirror(test.source(), test.db.clone());
    let loaded = first.get("L1").await.unwrap();
    assert_eq!(loaded.source, CacheSource::Loaded);
    assert_eq!(loaded.value.len(), 2);

    let cached = first.get("L1").await.unwrap();
    assert_eq!(cached.source, CacheSource::Fresh);

    let second = ConferenceRosterCache::with_mirror(test.source(), test.db.clone());
    let rehydrated = second.get("L1").await.unwrap();
    assert_eq!(rehydrated.source, CacheSource::Mirror);
    assert_eq!(rehydrated.value, loaded.value);
    assert_eq!(second.stats().await.mirror_hits, 1);

    test.assert_mocks();

    Ok(())
}

/// Expect a league that fails to load to leave other leagues cached
#[tokio::test]
async fn roster_refresh_isolates_failing_league() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_store_tables()
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .build()
        .await?;
    let failing = test
        .sleeper()
        .create_error_endpoint("/league/L2/rosters", 404, 1);

    let cache = ConferenceRosterCache::new(test.source());
    let results = cache
        .refresh_all(&["L1".to_string(), "L2".to_string()])
        .await;

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], (ref league, Ok(1)) if league == "L1"));
    assert!(results[1].1.is_err());
    assert_eq!(cache.get("L1").await.unwrap().source, CacheSource::Fresh);

    failing.assert();
    test.assert_mocks();

    Ok(())
}

/// Expect availability to be served from the mirror until a refresh is forced
#[tokio::test]
async fn availability_mirror_survives_restart() -> Result<(), TestError> {
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

    let before_restart = AvailabilityService::new(test.db.clone());
    let record = before_restart
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();
    assert!(record.is_available);

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

    let after_restart = AvailabilityService::new(test.db.clone());
    let mirrored = after_restart
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();
    assert!(mirrored.is_available);

    let forced = after_restart
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, true)
        .await
        .unwrap();
    assert!(!forced.is_available);
    assert_eq!(forced.owned_by_team_id, Some(team.id));

    Ok(())
}

/// Expect invalidating everything to clear the mirror as well
#[tokio::test]
async fn invalidate_all_clears_availability_mirror() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let player = test.league().insert_player("42", "RB", Some("SF")).await?;

    let service = AvailabilityService::new(test.db.clone());
    service
        .calculate_availability(player.id, TEST_SEASON_ID, TEST_WEEK, false)
        .await
        .unwrap();
    assert_eq!(entity::prelude::AvailabilityCache::find().count(&test.db).await?, 1);

    service.invalidate_all().await;

    assert_eq!(entity::prelude::AvailabilityCache::find().count(&test.db).await?, 0);

    Ok(())
}
