use entity::sea_orm_active_enums::{AvailabilityStatus, RosterStatus, RosterTransaction};
use huddle::{
    data::{roster_entry::RosterEntryRepository, roster_history::RosterHistoryRepository},
    error::{roster::RosterError, Error},
    model::{
        availability::AvailabilityKey,
        roster::{RosterAction, RosterTarget},
    },
    service::{availability::AvailabilityService, roster::RosterService},
};

use super::*;

struct Slot {
    target: RosterTarget,
    team_id: i32,
    rival_id: i32,
}

async fn slot(test: &TestContext) -> Result<Slot, TestError> {
    let conference = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L1", "North")
        .await?;
    let team = test.league().insert_team("North A").await?;
    let rival = test.league().insert_team("North B").await?;
    test.league()
        .insert_junction(team.id, conference.id, Some(1), true)
        .await?;
    test.league()
        .insert_junction(rival.id, conference.id, Some(2), true)
        .await?;
    let player = test.league().insert_player("42", "WR", Some("DAL")).await?;

    Ok(Slot {
        target: RosterTarget {
            player_id: player.id,
            conference_id: conference.id,
            season_id: TEST_SEASON_ID,
            week: TEST_WEEK,
        },
        team_id: team.id,
        rival_id: rival.id,
    })
}

fn key_of(target: &RosterTarget) -> AvailabilityKey {
    AvailabilityKey {
        player_id: target.player_id,
        season_id: target.season_id,
        week: target.week,
        conference_id: Some(target.conference_id),
    }
}

/// Expect adding a player twice to keep one current entry and log both adds
#[tokio::test]
async fn repeated_add_keeps_single_current_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let service = RosterService::new(&test.db);

    let add = RosterAction::Add {
        target: slot.target,
        team_id: slot.team_id,
        status: RosterStatus::Bench,
    };
    service.apply(&add).await.unwrap();
    let entry = service.apply(&add).await.unwrap();

    let current = RosterEntryRepository::new(&test.db)
        .get_current(slot.team_id, &slot.target)
        .await?;
    assert_eq!(current.len(), 1);
    assert_eq!(entry.map(|e| e.id), Some(current[0].id));

    let history = RosterHistoryRepository::new(&test.db)
        .get_by_player(slot.target.player_id, TEST_SEASON_ID)
        .await?;
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .all(|row| row.action == RosterTransaction::Add));

    Ok(())
}

/// Expect adds of one team in two conferences to keep a current entry in each
#[tokio::test]
async fn add_in_second_conference_keeps_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let south = test
        .league()
        .insert_conference(TEST_SEASON_ID, "L2", "South")
        .await?;
    test.league()
        .insert_junction(slot.team_id, south.id, Some(1), true)
        .await?;
    let south_target = RosterTarget {
        conference_id: south.id,
        ..slot.target
    };
    let service = RosterService::new(&test.db);

    for target in [slot.target, south_target] {
        service
            .apply(&RosterAction::Add {
                target,
                team_id: slot.team_id,
                status: RosterStatus::Bench,
            })
            .await
            .unwrap();
    }

    let repo = RosterEntryRepository::new(&test.db);
    assert_eq!(repo.get_current(slot.team_id, &slot.target).await?.len(), 1);
    assert_eq!(repo.get_current(slot.team_id, &south_target).await?.len(), 1);

    Ok(())
}

/// Expect dropping a player the team doesn't hold to be a no-op
#[tokio::test]
async fn drop_without_entry_is_noop() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let service = RosterService::new(&test.db);

    let dropped = service
        .apply(&RosterAction::Drop {
            target: slot.target,
            team_id: slot.team_id,
        })
        .await
        .unwrap();

    assert!(dropped.is_none());
    let history = RosterHistoryRepository::new(&test.db)
        .get_by_player(slot.target.player_id, TEST_SEASON_ID)
        .await?;
    assert!(history.is_empty());

    Ok(())
}

/// Expect a status change of an unrostered player to be rejected
#[tokio::test]
async fn change_status_requires_current_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let service = RosterService::new(&test.db);

    let result = service
        .apply(&RosterAction::ChangeStatus {
            target: slot.target,
            team_id: slot.team_id,
            status: RosterStatus::Ir,
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::RosterError(RosterError::NotRostered { team_id, .. })) if team_id == slot.team_id
    ));

    Ok(())
}

/// Expect a trade to move the current entry and record both teams
#[tokio::test]
async fn trade_moves_player_to_receiving_team() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let service = RosterService::new(&test.db);

    service
        .apply(&RosterAction::Add {
            target: slot.target,
            team_id: slot.team_id,
            status: RosterStatus::Active,
        })
        .await
        .unwrap();
    service
        .apply(&RosterAction::Trade {
            target: slot.target,
            from_team_id: slot.team_id,
            to_team_id: slot.rival_id,
            status: RosterStatus::Bench,
        })
        .await
        .unwrap();

    let repo = RosterEntryRepository::new(&test.db);
    assert!(repo.get_current(slot.team_id, &slot.target).await?.is_empty());
    assert_eq!(repo.get_current(slot.rival_id, &slot.target).await?.len(), 1);

    let history = RosterHistoryRepository::new(&test.db)
        .get_by_player(slot.target.player_id, TEST_SEASON_ID)
        .await?;
    let trade = &history[1];
    assert_eq!(trade.action, RosterTransaction::Trade);
    assert_eq!(trade.from_team_id, Some(slot.team_id));
    assert_eq!(trade.to_team_id, Some(slot.rival_id));

    Ok(())
}

/// Expect a failed optimistic write to leave no tentative availability behind
#[tokio::test]
async fn optimistic_write_reverts_on_failure() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let availability = AvailabilityService::new(test.db.clone());

    let result = RosterService::new(&test.db)
        .apply_optimistic(
            &RosterAction::ChangeStatus {
                target: slot.target,
                team_id: slot.team_id,
                status: RosterStatus::Ir,
            },
            &availability,
        )
        .await;

    assert!(result.is_err());
    assert!(availability.cached(&key_of(&slot.target)).await.is_none());

    Ok(())
}

/// Expect a successful optimistic write to be visible on the next lookup
#[tokio::test]
async fn optimistic_write_reflects_new_owner() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .with_current_season()
        .build()
        .await?;
    let slot = slot(&test).await?;
    let availability = AvailabilityService::new(test.db.clone());

    let before = availability
        .calculate_conference_availability(
            slot.target.conference_id,
            slot.target.player_id,
            TEST_SEASON_ID,
            TEST_WEEK,
            false,
        )
        .await
        .unwrap();
    assert!(before.is_available);

    RosterService::new(&test.db)
        .apply_optimistic(
            &RosterAction::FreeAgentPickup {
                target: slot.target,
                team_id: slot.team_id,
                status: RosterStatus::Bench,
            },
            &availability,
        )
        .await
        .unwrap();

    let after = availability
        .calculate_conference_availability(
            slot.target.conference_id,
            slot.target.player_id,
            TEST_SEASON_ID,
            TEST_WEEK,
            false,
        )
        .await
        .unwrap();
    assert!(!after.is_available);
    assert_eq!(after.owned_by_team_id, Some(slot.team_id));
    assert_eq!(after.roster_status, AvailabilityStatus::Bench);

    Ok(())
}
