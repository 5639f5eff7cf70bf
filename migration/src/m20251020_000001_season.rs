use sea_orm_migration::{prelude::*, schema::*};

static IDX_SEASON_IS_CURRENT: &str = "idx-season-is_current";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Season::Table)
                    .if_not_exists()
                    .col(integer(Season::Id).primary_key())
                    .col(string(Season::Name))
                    .col(boolean(Season::IsCurrent))
                    .col(timestamp(Season::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SEASON_IS_CURRENT)
                    .table(Season::Table)
                    .col(Season::IsCurrent)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SEASON_IS_CURRENT)
                    .table(Season::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Season::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Season {
    Table,
    Id,
    Name,
    IsCurrent,
    CreatedAt,
}
