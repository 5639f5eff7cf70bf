use sea_orm_migration::{prelude::*, schema::*};

static IDX_CONFERENCE_SEASON_ID: &str = "idx-conference-season_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conference::Table)
                    .if_not_exists()
                    .col(pk_auto(Conference::Id))
                    .col(integer(Conference::SeasonId))
                    .col(string_uniq(Conference::ExternalLeagueId))
                    .col(string(Conference::Name))
                    .col(timestamp(Conference::CreatedAt))
                    .col(timestamp(Conference::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONFERENCE_SEASON_ID)
                    .table(Conference::Table)
                    .col(Conference::SeasonId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONFERENCE_SEASON_ID)
                    .table(Conference::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Conference::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Conference {
    Table,
    Id,
    SeasonId,
    ExternalLeagueId,
    Name,
    CreatedAt,
    UpdatedAt,
}
