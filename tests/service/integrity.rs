use chrono::TimeDelta;
use entity::sea_orm_active_enums::RosterStatus;
use huddle::service::integrity::IntegrityService;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
};

use super::*;

/// Expect orphans and the older duplicate to be removed and a rerun to change nothing
#[tokio::test]
async fn cleanup_removes_orphans_and_duplicates() -> Result<(), TestError> {
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
    test.league()
        .insert_junction(team.id, conference.id, Some(1), true)
        .await?;

    // The newer record gets the lower id, so only `last_updated` can pick it.
    let newer = test
        .league()
        .insert_team_season(team.id, conference.id, TEST_SEASON_ID)
        .await?;
    let older = test
        .league()
        .insert_team_season(team.id, conference.id, TEST_SEASON_ID)
        .await?;
    entity::team_season::ActiveModel {
        id: ActiveValue::Unchanged(older.id),
        last_updated: ActiveValue::Set(newer.last_updated - TimeDelta::days(1)),
        ..Default::default()
    }
    .update(&test.db)
    .await?;
    let orphan = test
        .league()
        .insert_team_season(team.id + 100, conference.id, TEST_SEASON_ID)
        .await?;

    let service = IntegrityService::new(&test.db);
    let report = service.audit().await.unwrap();
    assert_eq!(report.orphaned_records.team_season_ids, vec![orphan.id]);
    assert_eq!(report.duplicate_team_seasons.len(), 1);
    assert!(!report.recommendations.is_empty());

    let result = service.cleanup().await.unwrap();
    assert_eq!(result.deleted_orphans, 1);
    assert_eq!(result.deleted_duplicates, 1);
    assert!(result.errors.is_empty());

    assert!(service.audit().await.unwrap().is_clean());
    assert_eq!(entity::prelude::TeamSeason::find().count(&test.db).await?, 1);
    assert!(entity::prelude::TeamSeason::find_by_id(newer.id)
        .one(&test.db)
        .await?
        .is_some());

    let rerun = service.cleanup().await.unwrap();
    assert_eq!(rerun.changes(), 0);

    Ok(())
}

/// Expect missing junctions to be created and inactive ones reactivated
#[tokio::test]
async fn cleanup_repairs_junctions() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let unlinked = test.league().insert_team("North A").await?;
    let inactive = test.league().insert_team("North B").await?;
    let junction = test
        .league()
        .insert_junction(inactive.id, conference.id, Some(2), false)
        .await?;

    test.league()
        .insert_team_season(unlinked.id, conference.id, TEST_SEASON_ID)
        .await?;
    test.league()
        .insert_team_season(inactive.id, conference.id, TEST_SEASON_ID)
        .await?;

    let service = IntegrityService::new(&test.db);
    let report = service.audit().await.unwrap();
    assert_eq!(report.missing_junctions.len(), 1);
    assert_eq!(report.missing_junctions[0].team_id, unlinked.id);
    assert_eq!(report.inactive_junction_ids, vec![junction.id]);
    assert_eq!(report.invalid_relationships.len(), 2);

    let result = service.cleanup().await.unwrap();
    assert_eq!(result.created_junctions, 1);
    assert_eq!(result.reactivated_junctions, 1);

    let active = entity::prelude::TeamConference::find()
        .filter(entity::team_conference::Column::IsActive.eq(true))
        .count(&test.db)
        .await?;
    assert_eq!(active, 2);
    assert!(service.audit().await.unwrap().is_clean());

    Ok(())
}

/// Expect surplus current entries of one team and player to be demoted to history
#[tokio::test]
async fn cleanup_demotes_duplicate_current_entries() -> Result<(), TestError> {
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
    test.league()
        .insert_junction(team.id, conference.id, Some(1), true)
        .await?;
    let player = test.league().insert_player("42", "RB", Some("SF")).await?;

    for week in [TEST_WEEK - 1, TEST_WEEK] {
        test.league()
            .insert_roster_entry(
                team.id,
                player.id,
                conference.id,
                TEST_SEASON_ID,
                week,
                RosterStatus::Active,
            )
            .await?;
    }

    let service = IntegrityService::new(&test.db);
    let report = service.audit().await.unwrap();
    assert_eq!(report.duplicate_roster_entries.len(), 1);
    assert_eq!(report.duplicate_roster_entries[0].entry_ids.len(), 2);

    let result = service.cleanup().await.unwrap();
    assert_eq!(result.demoted_roster_entries, 1);

    let current = entity::prelude::RosterEntry::find()
        .filter(entity::roster_entry::Column::IsCurrent.eq(true))
        .count(&test.db)
        .await?;
    assert_eq!(current, 1);
    assert_eq!(entity::prelude::RosterEntry::find().count(&test.db).await?, 2);

    Ok(())
}
