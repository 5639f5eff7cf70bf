use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheSnapshot::Table)
                    .if_not_exists()
                    .col(string(CacheSnapshot::Key).primary_key())
                    .col(string(CacheSnapshot::Version))
                    .col(text(CacheSnapshot::Payload))
                    .col(timestamp(CacheSnapshot::StoredAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CacheSnapshot::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheSnapshot {
    Table,
    Key,
    Version,
    Payload,
    StoredAt,
}
