use sea_orm_migration::{prelude::*, schema::*};

static IDX_ROSTER_ENTRY_TEAM_ID: &str = "idx-roster_entry-team_id";
static IDX_ROSTER_ENTRY_PLAYER_ID: &str = "idx-roster_entry-player_id";
static IDX_ROSTER_ENTRY_CONFERENCE_ID: &str = "idx-roster_entry-conference_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RosterEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(RosterEntry::Id))
                    .col(integer(RosterEntry::TeamId))
                    .col(integer(RosterEntry::PlayerId))
                    .col(integer(RosterEntry::SeasonId))
                    .col(integer(RosterEntry::ConferenceId))
                    .col(integer(RosterEntry::Week))
                    .col(text(RosterEntry::Status))
                    .col(boolean(RosterEntry::IsCurrent))
                    .col(timestamp(RosterEntry::AddedDate))
                    .col(timestamp_null(RosterEntry::RemovedDate))
                    .col(timestamp(RosterEntry::CreatedAt))
                    .col(timestamp(RosterEntry::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROSTER_ENTRY_TEAM_ID)
                    .table(RosterEntry::Table)
                    .col(RosterEntry::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROSTER_ENTRY_PLAYER_ID)
                    .table(RosterEntry::Table)
                    .col(RosterEntry::PlayerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROSTER_ENTRY_CONFERENCE_ID)
                    .table(RosterEntry::Table)
                    .col(RosterEntry::ConferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROSTER_ENTRY_CONFERENCE_ID)
                    .table(RosterEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROSTER_ENTRY_PLAYER_ID)
                    .table(RosterEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROSTER_ENTRY_TEAM_ID)
                    .table(RosterEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RosterEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RosterEntry {
    Table,
    Id,
    TeamId,
    PlayerId,
    SeasonId,
    ConferenceId,
    Week,
    Status,
    IsCurrent,
    AddedDate,
    RemovedDate,
    CreatedAt,
    UpdatedAt,
}
