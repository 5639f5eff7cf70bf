//! Player catalog stage of a full synchronization.

use std::collections::HashSet;

use entity::sea_orm_active_enums::SyncType;

use crate::{
    data::{
        player::{snapshot_differs, PlayerRepository},
        sync_status::{SyncStatusRepository, SyncStatusUpdate},
    },
    model::{
        source::PlayerSnapshot,
        sync::{SyncProgress, SyncStage},
    },
    service::{
        retry::RetryContext,
        sync::{StageOutcome, SyncContext},
    },
    util::time,
};

#[derive(Debug, PartialEq, Eq)]
enum Upsert {
    Created,
    Updated,
    Unchanged,
}

/// Fetches the player catalog and upserts it in batches.
///
/// Per-player write failures are collected and the stage moves on. Players missing from a
/// complete catalog are flagged as no longer current.
pub(super) async fn sync_players(ctx: &SyncContext<'_>) -> StageOutcome {
    let started_at = time::now();
    let mut outcome = StageOutcome::default();

    tracing::info!("Starting player sync for season {}", ctx.config.season_id);

    let mut retry: RetryContext<()> = RetryContext::with_policy(ctx.config.retry_policy());
    outcome.api_calls += 1;
    let catalog = retry
        .execute_with_retry("player catalog fetch", |_| {
            let source = ctx.source.clone();

            Box::pin(async move { source.fetch_all_players().await })
        })
        .await;

    let mut snapshots: Vec<PlayerSnapshot> = match catalog {
        Ok(catalog) => catalog.into_values().collect(),
        Err(e) => {
            outcome
                .errors
                .push(format!("Failed to fetch player catalog: {}", e));
            record_status(ctx, &outcome, started_at).await;
            return outcome;
        }
    };
    snapshots.sort_by(|a, b| a.player_id.cmp(&b.player_id));

    let repo = PlayerRepository::new(ctx.db);
    let total = snapshots.len();
    let batch_size = ctx.config.batch_size.max(1);
    let batch_count = total.div_ceil(batch_size);
    let (mut created, mut updated) = (0, 0);

    for (batch_index, batch) in snapshots.chunks(batch_size).enumerate() {
        if ctx.stop_requested() {
            let message = format!(
                "Player sync stopped after {} of {} players",
                outcome.records_processed, total
            );
            tracing::info!("{}", message);
            outcome.stopped = true;
            outcome.errors.push(message);
            break;
        }

        let external_ids: Vec<String> = batch.iter().map(|p| p.player_id.clone()).collect();
        let existing = match repo.find_by_external_ids(&external_ids).await {
            Ok(existing) => existing,
            Err(e) => {
                outcome.errors.push(format!(
                    "Failed to load player batch {}/{}: {}",
                    batch_index + 1,
                    batch_count,
                    e
                ));
                continue;
            }
        };

        for snapshot in batch {
            let result = match existing.get(&snapshot.player_id) {
                None => repo.create(snapshot).await.map(|_| Upsert::Created),
                Some(player) if snapshot_differs(player, snapshot) || !player.is_current_data => {
                    repo.update_from_snapshot(player.clone(), snapshot)
                        .await
                        .map(|_| Upsert::Updated)
                }
                Some(_) => Ok(Upsert::Unchanged),
            };

            match result {
                Ok(Upsert::Created) => created += 1,
                Ok(Upsert::Updated) => updated += 1,
                Ok(Upsert::Unchanged) => {}
                Err(e) => outcome.errors.push(format!(
                    "Failed to upsert player {}: {}",
                    snapshot.player_id, e
                )),
            }

            outcome.records_processed += 1;
            ctx.progress.emit(SyncProgress {
                stage: SyncStage::Players,
                progress: outcome.records_processed,
                total,
                current_item: Some(snapshot.display_name()),
            });
        }

        tracing::debug!(
            "Processed player batch {}/{} ({} players)",
            batch_index + 1,
            batch_count,
            batch.len()
        );

        if batch_index + 1 < batch_count && ctx.config.batch_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(ctx.config.batch_delay_ms)).await;
        }
    }

    // An empty catalog is treated as a bad response rather than every player retiring.
    if !outcome.stopped && !snapshots.is_empty() {
        let superseded = supersede_missing(ctx, &snapshots, &mut outcome).await;
        tracing::info!(
            "Player sync finished: {} created, {} updated, {} no longer current, {} errors",
            created,
            updated,
            superseded,
            outcome.errors.len()
        );
    }

    record_status(ctx, &outcome, started_at).await;

    outcome
}

/// Flags stored players absent from the catalog as no longer current.
async fn supersede_missing(
    ctx: &SyncContext<'_>,
    snapshots: &[PlayerSnapshot],
    outcome: &mut StageOutcome,
) -> u64 {
    let repo = PlayerRepository::new(ctx.db);
    let catalog_ids: HashSet<&str> = snapshots.iter().map(|p| p.player_id.as_str()).collect();

    let stored = match repo.get_current_external_ids().await {
        Ok(stored) => stored,
        Err(e) => {
            outcome
                .errors
                .push(format!("Failed to load current players: {}", e));
            return 0;
        }
    };

    let missing: Vec<i32> = stored
        .into_iter()
        .filter(|(_, external_id)| !catalog_ids.contains(external_id.as_str()))
        .map(|(id, _)| id)
        .collect();

    match repo.mark_not_current(&missing).await {
        Ok(count) => count,
        Err(e) => {
            outcome.errors.push(format!(
                "Failed to flag {} missing players: {}",
                missing.len(),
                e
            ));
            0
        }
    }
}

async fn record_status(
    ctx: &SyncContext<'_>,
    outcome: &StageOutcome,
    started_at: chrono::NaiveDateTime,
) {
    let completed_at = time::now();
    let update = SyncStatusUpdate {
        sync_type: SyncType::Players,
        conference_id: None,
        season_id: ctx.config.season_id,
        week: ctx.config.week,
        started_at,
        completed_at,
        duration_ms: (completed_at - started_at).num_milliseconds(),
        records_processed: outcome.records_processed as i32,
        error_count: outcome.errors.len() as i32,
        last_error: outcome.errors.last().cloned(),
    };

    if let Err(e) = SyncStatusRepository::new(ctx.db).upsert(update).await {
        tracing::warn!("Failed to record player sync status: {}", e);
    }
}
