use axum::http::StatusCode;
use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (network failures, server errors, rate limiting)
    Retry,
    /// Failed permanently (bad request, bad data, programming errors)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::SourceError(sleeper_api::Error::ReqwestError(reqwest_error)) => {
                if let Some(status) = reqwest_error.status() {
                    match status {
                        // 429 - Sleeper throttles bursts, backing off resolves it
                        StatusCode::TOO_MANY_REQUESTS => ErrorRetryStrategy::Retry,

                        // 5xx - Sleeper is temporarily unavailable
                        s if s.is_server_error() => ErrorRetryStrategy::Retry,

                        // 4xx - unknown league or malformed path, retrying won't help
                        s if s.is_client_error() => ErrorRetryStrategy::Fail,

                        _ => ErrorRetryStrategy::Fail,
                    }
                } else if reqwest_error.is_decode() {
                    // Body arrived but didn't match the expected shape
                    ErrorRetryStrategy::Fail
                } else {
                    // Network error or connection issue
                    ErrorRetryStrategy::Retry
                }
            }

            Self::DbErr(db_err) => match db_err {
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query, type conversion and record errors won't resolve with retry
                _ => ErrorRetryStrategy::Fail,
            },

            Self::SourceError(_) => ErrorRetryStrategy::Fail,
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::SyncError(_) => ErrorRetryStrategy::Fail,
            Self::CacheError(_) => ErrorRetryStrategy::Fail,
            Self::RosterError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
