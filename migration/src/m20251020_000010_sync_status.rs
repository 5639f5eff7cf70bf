use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SyncStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(SyncStatus::Id))
                    .col(text(SyncStatus::SyncType))
                    .col(integer_null(SyncStatus::ConferenceId))
                    .col(integer(SyncStatus::SeasonId))
                    .col(integer(SyncStatus::Week))
                    .col(timestamp(SyncStatus::LastStartedAt))
                    .col(timestamp(SyncStatus::LastCompletedAt))
                    .col(big_integer(SyncStatus::DurationMs))
                    .col(integer(SyncStatus::RecordsProcessed))
                    .col(integer(SyncStatus::ErrorCount))
                    .col(text_null(SyncStatus::LastError))
                    .col(timestamp(SyncStatus::NextSyncDue))
                    .col(timestamp(SyncStatus::CreatedAt))
                    .col(timestamp(SyncStatus::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SyncStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SyncStatus {
    Table,
    Id,
    SyncType,
    ConferenceId,
    SeasonId,
    Week,
    LastStartedAt,
    LastCompletedAt,
    DurationMs,
    RecordsProcessed,
    ErrorCount,
    LastError,
    NextSyncDue,
    CreatedAt,
    UpdatedAt,
}
