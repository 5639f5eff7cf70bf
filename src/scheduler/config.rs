pub mod integrity {
    /// Cron expression for the integrity audit
    /// Runs daily at 03:00, away from the hourly sync
    pub const CRON_EXPRESSION: &str = "0 0 3 * * *";
}

pub mod cache_mirror {
    /// Cron expression for pruning expired mirror rows
    /// Runs every hour at 30 minutes past
    pub const CRON_EXPRESSION: &str = "0 30 * * * *";
}

pub mod roster_cache {
    /// Cron expression for warming the roster cache of the current season
    /// Runs every 15 minutes, inside the roster cache's 30 minute hard expiry
    pub const CRON_EXPRESSION: &str = "0 */15 * * * *";
}
