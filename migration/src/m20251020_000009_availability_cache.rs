use sea_orm_migration::{prelude::*, schema::*};

static IDX_AVAILABILITY_CACHE_PLAYER_ID: &str = "idx-availability_cache-player_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityCache::Table)
                    .if_not_exists()
                    .col(pk_auto(AvailabilityCache::Id))
                    .col(integer(AvailabilityCache::PlayerId))
                    .col(integer(AvailabilityCache::SeasonId))
                    .col(integer(AvailabilityCache::Week))
                    .col(integer_null(AvailabilityCache::ConferenceId))
                    .col(boolean(AvailabilityCache::IsAvailable))
                    .col(integer_null(AvailabilityCache::OwnedByTeamId))
                    .col(integer_null(AvailabilityCache::OwnedByConferenceId))
                    .col(text(AvailabilityCache::RosterStatus))
                    .col(integer_null(AvailabilityCache::WaiverPriority))
                    .col(timestamp(AvailabilityCache::CacheUpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AVAILABILITY_CACHE_PLAYER_ID)
                    .table(AvailabilityCache::Table)
                    .col(AvailabilityCache::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AVAILABILITY_CACHE_PLAYER_ID)
                    .table(AvailabilityCache::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AvailabilityCache::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AvailabilityCache {
    Table,
    Id,
    PlayerId,
    SeasonId,
    Week,
    ConferenceId,
    IsAvailable,
    OwnedByTeamId,
    OwnedByConferenceId,
    RosterStatus,
    WaiverPriority,
    CacheUpdatedAt,
}
