use sea_orm_migration::{prelude::*, schema::*};

static IDX_TEAM_SEASON_TEAM_ID: &str = "idx-team_season-team_id";
static IDX_TEAM_SEASON_CONFERENCE_ID: &str = "idx-team_season-conference_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamSeason::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamSeason::Id))
                    .col(integer(TeamSeason::TeamId))
                    .col(integer(TeamSeason::ConferenceId))
                    .col(integer(TeamSeason::SeasonId))
                    .col(integer(TeamSeason::Wins))
                    .col(integer(TeamSeason::Losses))
                    .col(integer(TeamSeason::Ties))
                    .col(double(TeamSeason::PointsFor))
                    .col(double(TeamSeason::PointsAgainst))
                    .col(timestamp(TeamSeason::LastUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_SEASON_TEAM_ID)
                    .table(TeamSeason::Table)
                    .col(TeamSeason::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEAM_SEASON_CONFERENCE_ID)
                    .table(TeamSeason::Table)
                    .col(TeamSeason::ConferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_SEASON_CONFERENCE_ID)
                    .table(TeamSeason::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEAM_SEASON_TEAM_ID)
                    .table(TeamSeason::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TeamSeason::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TeamSeason {
    Table,
    Id,
    TeamId,
    ConferenceId,
    SeasonId,
    Wins,
    Losses,
    Ties,
    PointsFor,
    PointsAgainst,
    LastUpdated,
}
