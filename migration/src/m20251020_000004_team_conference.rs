use sea_orm_migration::{prelude::*, schema::*};

static IDX_TEAM_CONFERENCE_TEAM_ID: &str = "idx-team_conference-team_id";
static IDX_TEAM_CONFERENCE_CONFERENCE_ID: &str = "idx-team_conference-conference_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamConference::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamConference::Id))
                    .col(integer(TeamConference::TeamId))
                    .col(integer(TeamConference::ConferenceId))
                    .col(integer_null(TeamConference::ExternalRosterId))
                    .col(integer_null(TeamConference::WaiverPosition))
                    .col(boolean(TeamConference::IsActive))
                    .col(timestamp(TeamConference::CreatedAt))
                    .col(timestamp(TeamConference::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_CONFERENCE_TEAM_ID)
                    .table(TeamConference::Table)
                    .col(TeamConference::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_CONFERENCE_CONFERENCE_ID)
                    .table(TeamConference::Table)
                    .col(TeamConference::ConferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_CONFERENCE_CONFERENCE_ID)
                    .table(TeamConference::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_CONFERENCE_TEAM_ID)
                    .table(TeamConference::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TeamConference::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TeamConference {
    Table,
    Id,
    TeamId,
    ConferenceId,
    ExternalRosterId,
    WaiverPosition,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
