//! Environment-driven server configuration.

use std::{str::FromStr, time::Duration};

use crate::{
    error::{config::ConfigError, Error},
    model::sync::{DEFAULT_BATCH_SIZE, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS},
};

static DEFAULT_USER_AGENT: &str = concat!("huddle/", env!("CARGO_PKG_VERSION"));
static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 60;
const DEFAULT_SYNC_WEEK: i32 = 1;

pub struct Config {
    pub database_url: String,
    pub sleeper_api_url: String,
    pub user_agent: String,
    pub bind_address: String,
    pub sync_interval: Duration,
    pub sync_week: i32,
    pub sync_batch_size: usize,
    pub sync_retry_attempts: u32,
    pub sync_retry_delay_ms: u64,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// Only `DATABASE_URL` is required; everything else falls back to a default.
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and valid
    /// - `Err(Error::ConfigError)` - A required variable is missing or a value doesn't parse
    pub fn from_env() -> Result<Self, Error> {
        let sync_interval_minutes: u64 =
            parse_or("SYNC_INTERVAL_MINUTES", DEFAULT_SYNC_INTERVAL_MINUTES)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            sleeper_api_url: optional("SLEEPER_API_URL")
                .unwrap_or_else(|| sleeper_api::client::DEFAULT_BASE_URL.to_string()),
            user_agent: optional("HUDDLE_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            sync_interval: Duration::from_secs(sync_interval_minutes * 60),
            sync_week: parse_or("SYNC_WEEK", DEFAULT_SYNC_WEEK)?,
            sync_batch_size: parse_or("SYNC_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            sync_retry_attempts: parse_or("SYNC_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)?,
            sync_retry_delay_ms: parse_or("SYNC_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

fn parse_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(value) => parse_value(var, &value),
        None => Ok(default),
    }
}

fn parse_value<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        reason: e.to_string(),
    })
}
