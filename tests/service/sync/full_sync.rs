use std::sync::{Arc, Mutex};

use entity::sea_orm_active_enums::{RosterStatus, RosterTransaction};
use huddle::{
    model::{
        availability::OwnershipPolicy,
        sync::{ConferenceTarget, SyncProgress, SyncStage},
    },
    service::integrity::IntegrityService,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::*;

/// A conference with two teams mapped to roster ids 1 and 2.
struct League {
    conference: ConferenceTarget,
    team_a: entity::team::Model,
    team_b: entity::team::Model,
}

async fn insert_league(
    test: &TestContext,
    league_id: &str,
    name: &str,
) -> Result<League, TestError> {
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, league_id, name)
        .await?;
    let team_a = test.league().insert_team(&format!("{} A", name)).await?;
    let team_b = test.league().insert_team(&format!("{} B", name)).await?;
    test.league()
        .insert_junction(team_a.id, conference.id, Some(1), true)
        .await?;
    test.league()
        .insert_junction(team_b.id, conference.id, Some(2), true)
        .await?;

    Ok(League {
        conference: conference.into(),
        team_a,
        team_b,
    })
}

async fn current_entries(
    db: &DatabaseConnection,
) -> Result<Vec<entity::roster_entry::Model>, TestError> {
    Ok(entity::prelude::RosterEntry::find()
        .filter(entity::roster_entry::Column::IsCurrent.eq(true))
        .order_by_asc(entity::roster_entry::Column::Id)
        .all(db)
        .await?)
}

async fn player_id(db: &DatabaseConnection, external_id: &str) -> Result<i32, TestError> {
    let player = entity::prelude::Player::find()
        .filter(entity::player::Column::ExternalPlayerId.eq(external_id))
        .one(db)
        .await?;

    Ok(player.map(|p| p.id).unwrap_or_default())
}

fn catalog() -> Vec<sleeper_api::model::Player> {
    vec![
        factory::mock_player("100", "QB", Some("KC")),
        factory::mock_player("200", "RB", Some("SF")),
        factory::mock_player("300", "WR", None),
    ]
}

/// Expect players and rosters of a conference to be reconciled into current entries
#[tokio::test]
async fn reconciles_rosters_into_current_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(catalog(), 1)
        .with_rosters_endpoint(
            "L1",
            vec![
                factory::mock_roster(1, "u1", &["100", "200"], 1),
                factory::mock_roster(2, "u2", &["300"], 0),
            ],
            1,
        )
        .with_users_endpoint(
            "L1",
            vec![
                factory::mock_user("u1", "Alice"),
                factory::mock_user("u2", "Bob"),
            ],
            1,
        )
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();

    assert!(result.success, "unexpected errors: {:?}", result.errors);
    assert_eq!(result.records_processed, 5);
    assert_eq!(result.api_calls, 3);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 3);

    let entry_of = |id: i32| entries.iter().find(|e| e.player_id == id);
    let qb = entry_of(player_id(&test.db, "100").await?).unwrap();
    assert_eq!(qb.team_id, league.team_a.id);
    assert_eq!(qb.status, RosterStatus::Active);
    let rb = entry_of(player_id(&test.db, "200").await?).unwrap();
    assert_eq!(rb.team_id, league.team_a.id);
    assert_eq!(rb.status, RosterStatus::Bench);
    let wr = entry_of(player_id(&test.db, "300").await?).unwrap();
    assert_eq!(wr.team_id, league.team_b.id);

    let team_a = entity::prelude::Team::find_by_id(league.team_a.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(team_a.owner_name.as_deref(), Some("Alice"));

    test.assert_mocks();

    Ok(())
}

/// Expect a second run over an unchanged snapshot to change nothing
#[tokio::test]
async fn repeated_sync_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(catalog(), 2)
        .with_rosters_endpoint(
            "L1",
            vec![
                factory::mock_roster(1, "u1", &["100", "200"], 1),
                factory::mock_roster(2, "u2", &["300"], 0),
            ],
            2,
        )
        .with_users_endpoint("L1", vec![factory::mock_user("u1", "Alice")], 2)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let config = test.sync_configuration(vec![league.conference.clone()]);

    let first = engine.full_sync(&config).await.unwrap();
    let entries_after_first = current_entries(&test.db).await?;
    let history_after_first = entity::prelude::RosterHistory::find().all(&test.db).await?;

    let second = engine.full_sync(&config).await.unwrap();
    let entries_after_second = current_entries(&test.db).await?;
    let history_after_second = entity::prelude::RosterHistory::find().all(&test.db).await?;

    assert!(first.success && second.success);
    assert_eq!(first.records_processed, second.records_processed);
    assert_eq!(entries_after_first, entries_after_second);
    assert_eq!(history_after_first.len(), 3);
    assert_eq!(history_after_second.len(), 3);

    let report = IntegrityService::new(&test.db).audit().await.unwrap();
    assert!(report.duplicate_roster_entries.is_empty());
    assert!(report.duplicate_team_seasons.is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expect a player moved to another team to be traded, not duplicated
#[tokio::test]
async fn moved_player_is_traded_between_teams() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(vec![factory::mock_player("100", "QB", Some("KC"))], 1)
        .with_rosters_endpoint(
            "L1",
            vec![
                factory::mock_roster(1, "u1", &["100"], 1),
                factory::mock_roster(2, "u2", &[], 0),
            ],
            1,
        )
        .with_users_endpoint("L1", Vec::new(), 1)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;
    let player = test.league().insert_player("100", "QB", Some("KC")).await?;
    let previous = test
        .league()
        .insert_roster_entry(
            league.team_b.id,
            player.id,
            league.conference.id,
            TEST_SEASON_ID,
            TEST_WEEK - 1,
            RosterStatus::Bench,
        )
        .await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();
    assert!(result.success, "unexpected errors: {:?}", result.errors);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].team_id, league.team_a.id);
    assert_eq!(entries[0].status, RosterStatus::Active);
    assert_ne!(entries[0].id, previous.id);

    let history = entity::prelude::RosterHistory::find().all(&test.db).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, RosterTransaction::Trade);
    assert_eq!(history[0].from_team_id, Some(league.team_b.id));
    assert_eq!(history[0].to_team_id, Some(league.team_a.id));

    test.assert_mocks();

    Ok(())
}

/// Expect the same player owned in two conferences to be kept in both
#[tokio::test]
async fn conferences_own_players_independently() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(vec![factory::mock_player("100", "QB", Some("KC"))], 1)
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_rosters_endpoint("L2", vec![factory::mock_roster(2, "u2", &["100"], 0)], 1)
        .with_users_endpoint("L1", Vec::new(), 1)
        .with_users_endpoint("L2", Vec::new(), 1)
        .build()
        .await?;
    let north = insert_league(&test, "L1", "North").await?;
    let south = insert_league(&test, "L2", "South").await?;

    let (engine, availability) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![
            north.conference.clone(),
            south.conference.clone(),
        ]))
        .await
        .unwrap();
    assert!(result.success, "unexpected errors: {:?}", result.errors);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.team_id == north.team_a.id));
    assert!(entries.iter().any(|e| e.team_id == south.team_b.id));

    let same_conference = availability
        .find_conflicting_ownership(
            TEST_SEASON_ID,
            TEST_WEEK,
            OwnershipPolicy::SameConferenceOnly,
        )
        .await
        .unwrap();
    assert!(same_conference.is_empty());

    let cross_conference = availability
        .find_conflicting_ownership(
            TEST_SEASON_ID,
            TEST_WEEK,
            OwnershipPolicy::FlagCrossConference,
        )
        .await
        .unwrap();
    assert_eq!(cross_conference.len(), 1);
    assert!(!cross_conference[0].same_conference);

    test.assert_mocks();

    Ok(())
}

/// Expect a team linked to two conferences to hold a shared player in each of them
#[tokio::test]
async fn shared_team_holds_player_in_each_conference() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(vec![factory::mock_player("100", "QB", Some("KC"))], 2)
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 2)
        .with_rosters_endpoint("L2", vec![factory::mock_roster(1, "u1", &["100"], 0)], 2)
        .with_users_endpoint("L1", Vec::new(), 2)
        .with_users_endpoint("L2", Vec::new(), 2)
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
    let team = test.league().insert_team("Shared").await?;
    test.league()
        .insert_junction(team.id, north.id, Some(1), true)
        .await?;
    test.league()
        .insert_junction(team.id, south.id, Some(1), true)
        .await?;

    let (engine, availability) = test.sync_engine();
    let config = test.sync_configuration(vec![north.clone().into(), south.clone().into()]);

    let first = engine.full_sync(&config).await.unwrap();
    let history_after_first = entity::prelude::RosterHistory::find().all(&test.db).await?;
    let second = engine.full_sync(&config).await.unwrap();
    let history_after_second = entity::prelude::RosterHistory::find().all(&test.db).await?;

    assert!(first.success, "unexpected errors: {:?}", first.errors);
    assert!(second.success, "unexpected errors: {:?}", second.errors);
    assert_eq!(history_after_first.len(), 2);
    assert_eq!(history_after_second.len(), 2);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .all(|entry| entry.team_id == team.id && entry.removed_date.is_none()));
    assert!(entries.iter().any(|entry| entry.conference_id == north.id));
    assert!(entries.iter().any(|entry| entry.conference_id == south.id));

    let player = player_id(&test.db, "100").await?;
    for conference_id in [north.id, south.id] {
        let record = availability
            .calculate_conference_availability(
                conference_id,
                player,
                TEST_SEASON_ID,
                TEST_WEEK,
                true,
            )
            .await
            .unwrap();
        assert!(!record.is_available);
        assert_eq!(record.owned_by_team_id, Some(team.id));
        assert_eq!(record.owned_by_conference_id, Some(conference_id));
    }

    let conflicts = availability
        .find_conflicting_ownership(
            TEST_SEASON_ID,
            TEST_WEEK,
            OwnershipPolicy::FlagCrossConference,
        )
        .await
        .unwrap();
    assert!(conflicts.is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expect a rostered player missing from the catalog to be reported while the rest syncs
#[tokio::test]
async fn unknown_player_is_reported_and_skipped() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(catalog(), 1)
        .with_rosters_endpoint(
            "L1",
            vec![
                factory::mock_roster(1, "u1", &["100", "999"], 1),
                factory::mock_roster(2, "u2", &["300"], 0),
            ],
            1,
        )
        .with_users_endpoint("L1", Vec::new(), 1)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("unknown player 999"));
    assert_eq!(result.records_processed, 5);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .any(|e| e.team_id == league.team_a.id && e.status == RosterStatus::Active));
    assert!(entries.iter().any(|e| e.team_id == league.team_b.id));

    test.assert_mocks();

    Ok(())
}

/// Expect a roster without a junction to be reported and skipped without touching the others
#[tokio::test]
async fn unmapped_roster_is_reported_and_skipped() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(catalog(), 1)
        .with_rosters_endpoint(
            "L1",
            vec![
                factory::mock_roster(1, "u1", &["100"], 1),
                factory::mock_roster(2, "u2", &["300"], 0),
                factory::mock_roster(3, "u3", &["200"], 0),
            ],
            1,
        )
        .with_users_endpoint("L1", Vec::new(), 1)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("roster 3 is not mapped"));
    assert_eq!(result.records_processed, 5);

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 2);
    let unmapped_player = player_id(&test.db, "200").await?;
    assert!(entries.iter().all(|e| e.player_id != unmapped_player));

    test.assert_mocks();

    Ok(())
}

/// Expect a failing conference to be reported without blocking the others
#[tokio::test]
async fn failed_conference_does_not_block_others() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/league/L1/rosters")
                .with_status(404)
                .expect(1)
                .create()
        })
        .with_players_endpoint(vec![factory::mock_player("100", "QB", Some("KC"))], 1)
        .with_rosters_endpoint("L2", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_users_endpoint("L2", Vec::new(), 1)
        .build()
        .await?;
    let north = insert_league(&test, "L1", "North").await?;
    let south = insert_league(&test, "L2", "South").await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![
            north.conference.clone(),
            south.conference.clone(),
        ]))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("North"));

    let entries = current_entries(&test.db).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].team_id, south.team_a.id);

    test.assert_mocks();

    Ok(())
}

/// Expect a transient roster failure to be retried within the same run
#[tokio::test]
async fn retries_transient_roster_failures() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/league/L1/rosters")
                .with_status(503)
                .expect(1)
                .create()
        })
        .with_players_endpoint(vec![factory::mock_player("100", "QB", Some("KC"))], 1)
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_users_endpoint("L1", Vec::new(), 1)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let result = engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();

    assert!(result.success, "unexpected errors: {:?}", result.errors);
    assert_eq!(current_entries(&test.db).await?.len(), 1);

    test.assert_mocks();

    Ok(())
}

/// Expect progress events for every player and conference, ending with completion
#[tokio::test]
async fn emits_progress_until_complete() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .with_players_endpoint(catalog(), 1)
        .with_rosters_endpoint("L1", vec![factory::mock_roster(1, "u1", &["100"], 1)], 1)
        .with_users_endpoint("L1", Vec::new(), 1)
        .build()
        .await?;
    let league = insert_league(&test, "L1", "North").await?;

    let (engine, _) = test.sync_engine();
    let events: Arc<Mutex<Vec<SyncProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let subscription = engine.on_progress({
        let events = Arc::clone(&events);
        move |progress| events.lock().unwrap().push(progress.clone())
    });

    engine
        .full_sync(&test.sync_configuration(vec![league.conference.clone()]))
        .await
        .unwrap();
    subscription.unsubscribe();

    let events = events.lock().unwrap();
    let player_events = events
        .iter()
        .filter(|e| e.stage == SyncStage::Players)
        .count();
    assert_eq!(player_events, 3);
    assert!(events.iter().any(|e| e.stage == SyncStage::Rosters));
    assert_eq!(events.last().map(|e| e.stage), Some(SyncStage::Complete));

    let state = engine.get_sync_state().await;
    assert_eq!(state.last_progress.map(|p| p.stage), Some(SyncStage::Complete));
    assert!(state.last_result.is_some());
    assert!(state.last_sync_at.is_some());

    Ok(())
}
