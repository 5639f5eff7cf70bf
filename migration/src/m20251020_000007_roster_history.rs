use sea_orm_migration::{prelude::*, schema::*};

static IDX_ROSTER_HISTORY_CONFERENCE_ID: &str = "idx-roster_history-conference_id";
static IDX_ROSTER_HISTORY_PLAYER_ID: &str = "idx-roster_history-player_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RosterHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(RosterHistory::Id))
                    .col(integer(RosterHistory::ConferenceId))
                    .col(integer(RosterHistory::SeasonId))
                    .col(integer(RosterHistory::Week))
                    .col(integer(RosterHistory::PlayerId))
                    .col(text(RosterHistory::Action))
                    .col(integer_null(RosterHistory::FromTeamId))
                    .col(integer_null(RosterHistory::ToTeamId))
                    .col(timestamp(RosterHistory::OccurredAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROSTER_HISTORY_CONFERENCE_ID)
                    .table(RosterHistory::Table)
                    .col(RosterHistory::ConferenceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROSTER_HISTORY_PLAYER_ID)
                    .table(RosterHistory::Table)
                    .col(RosterHistory::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROSTER_HISTORY_PLAYER_ID)
                    .table(RosterHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROSTER_HISTORY_CONFERENCE_ID)
                    .table(RosterHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RosterHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RosterHistory {
    Table,
    Id,
    ConferenceId,
    SeasonId,
    Week,
    PlayerId,
    Action,
    FromTeamId,
    ToTeamId,
    OccurredAt,
}
