use thiserror::Error;

/// Errors returned by the Sleeper client.
#[derive(Error, Debug)]
pub enum Error {
    /// The client was configured with an invalid value.
    #[error("Invalid Sleeper client configuration: {0}")]
    ConfigError(String),
    /// Transport failure, non-success HTTP status, or body decoding failure.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::ReqwestError(err) => err.status(),
            Self::ConfigError(_) => None,
        }
    }
}
