use chrono::TimeDelta;
use huddle::{
    data::{availability_cache::AvailabilityCacheRepository, cache_snapshot::CacheSnapshotRepository},
    model::availability::{AvailabilityKey, AvailabilityRecord},
    scheduler::maintenance::{audit_integrity, prune_cache_mirrors, warm_roster_cache},
    util::time,
};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

fn free_agent(player_id: i32, cache_updated_at: chrono::NaiveDateTime) -> AvailabilityRecord {
    AvailabilityRecord::free_agent(
        AvailabilityKey {
            player_id,
            season_id: TEST_SEASON_ID,
            week: TEST_WEEK,
            conference_id: None,
        },
        cache_updated_at,
    )
}

/// Expect mirrored rows past their hard expiry to be deleted and recent ones kept
#[tokio::test]
async fn prunes_expired_mirror_rows() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;
    let now = time::now();
    let long_ago = now - TimeDelta::days(2);

    let availability = AvailabilityCacheRepository::new(&test.db);
    availability.replace(&free_agent(1, long_ago)).await?;
    availability.replace(&free_agent(2, now)).await?;

    let snapshots = CacheSnapshotRepository::new(&test.db);
    snapshots
        .upsert("rosters:L1", "rosters-v1", "[]".to_string(), long_ago)
        .await?;
    snapshots
        .upsert("rosters:L2", "rosters-v1", "[]".to_string(), now)
        .await?;

    let pruned = prune_cache_mirrors(&job_context(&test)).await.unwrap();

    assert_eq!(pruned, 2);
    assert_eq!(entity::prelude::AvailabilityCache::find().count(&test.db).await?, 1);
    assert!(snapshots.find("rosters:L1").await?.is_none());
    assert!(snapshots.find("rosters:L2").await?.is_some());

    Ok(())
}

/// Expect the audit job to count issue groups without repairing them
#[tokio::test]
async fn audit_counts_issues_without_repairing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    test.league()
        .insert_team_season(999, conference.id, TEST_SEASON_ID)
        .await?;

    let ctx = job_context(&test);
    assert_eq!(audit_integrity(&ctx).await.unwrap(), 1);
    assert_eq!(audit_integrity(&ctx).await.unwrap(), 1);

    Ok(())
}

/// Expect every conference of the current season to be loaded once, then left alone while fresh
#[tokio::test]
async fn warms_rosters_of_current_season() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_rosters_endpoint("L2", vec![factory::mock_roster(1, "u2", &["200"], 1)], 1)
        .build()
        .await?;
    test.league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    test.league()
        .insert_conference(TEST_SEASON_ID, "L2", "South")
        .await?;

    let ctx = job_context(&test);
    assert_eq!(warm_roster_cache(&ctx).await.unwrap(), 2);
    assert_eq!(ctx.rosters.stats().await.entries, 2);
    assert_eq!(warm_roster_cache(&ctx).await.unwrap(), 0);

    test.assert_mocks();

    Ok(())
}

/// Expect nothing to be warmed without a current season
#[tokio::test]
async fn warming_skips_without_current_season() -> Result<(), TestError> {
    let test = TestBuilder::new().with_store_tables().build().await?;

    assert_eq!(warm_roster_cache(&job_context(&test)).await.unwrap(), 0);

    Ok(())
}
