use sea_orm_migration::{prelude::*, schema::*};

static IDX_PLAYER_POSITION: &str = "idx-player-position";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(pk_auto(Player::Id))
                    .col(string_uniq(Player::ExternalPlayerId))
                    .col(string(Player::FullName))
                    .col(string_null(Player::Position))
                    .col(string_null(Player::NflTeam))
                    .col(string_null(Player::Status))
                    .col(string_null(Player::InjuryStatus))
                    .col(string_null(Player::Height))
                    .col(string_null(Player::Weight))
                    .col(integer_null(Player::Age))
                    .col(integer_null(Player::YearsExp))
                    .col(integer(Player::DataVersion))
                    .col(boolean(Player::IsCurrentData))
                    .col(timestamp(Player::CreatedAt))
                    .col(timestamp(Player::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLAYER_POSITION)
                    .table(Player::Table)
                    .col(Player::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLAYER_POSITION)
                    .table(Player::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Player {
    Table,
    Id,
    ExternalPlayerId,
    FullName,
    Position,
    NflTeam,
    Status,
    InjuryStatus,
    Height,
    Weight,
    Age,
    YearsExp,
    DataVersion,
    IsCurrentData,
    CreatedAt,
    UpdatedAt,
}
