pub use sea_orm_migration::prelude::*;

mod m20251020_000001_season;
mod m20251020_000002_conference;
mod m20251020_000003_team;
mod m20251020_000004_team_conference;
mod m20251020_000005_player;
mod m20251020_000006_roster_entry;
mod m20251020_000007_roster_history;
mod m20251020_000008_team_season;
mod m20251020_000009_availability_cache;
mod m20251020_000010_sync_status;
mod m20251020_000011_cache_snapshot;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_season::Migration),
            Box::new(m20251020_000002_conference::Migration),
            Box::new(m20251020_000003_team::Migration),
            Box::new(m20251020_000004_team_conference::Migration),
            Box::new(m20251020_000005_player::Migration),
            Box::new(m20251020_000006_roster_entry::Migration),
            Box::new(m20251020_000007_roster_history::Migration),
            Box::new(m20251020_000008_team_season::Migration),
            Box::new(m20251020_000009_availability_cache::Migration),
            Box::new(m20251020_000010_sync_status::Migration),
            Box::new(m20251020_000011_cache_snapshot::Migration),
        ]
    }
}
