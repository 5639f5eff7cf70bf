use std::{sync::Arc, time::Duration};

use serde::de::DeserializeOwned;

use crate::{
    endpoints::{league::LeagueEndpoints, players::PlayerEndpoints},
    error::Error,
};

/// Public Sleeper API base URL.
pub static DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";

static DEFAULT_USER_AGENT: &str = concat!("sleeper-api/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Cheaply clonable Sleeper API client.
///
/// Endpoints are grouped the way the API groups them: [`Client::players`] for the
/// player catalog and [`Client::league`] for per-league snapshots.
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientRef>,
}

#[derive(Debug)]
struct ClientRef {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a builder with the public API URL and a default user agent.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Player catalog endpoints.
    pub fn players(&self) -> PlayerEndpoints<'_> {
        PlayerEndpoints::new(self)
    }

    /// League-scoped endpoints (rosters, users, matchups).
    pub fn league(&self) -> LeagueEndpoints<'_> {
        LeagueEndpoints::new(self)
    }

    /// Base URL requests are made against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Performs a GET request against `path` and decodes the JSON body.
    ///
    /// Non-success statuses are converted into [`Error::ReqwestError`] carrying the
    /// status so callers can classify them.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = format!("{}{}", self.inner.base_url, path);

        tracing::trace!("GET {}", url);

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientBuilder {
    /// Overrides the API base URL, used to point the client at a mock server in tests.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the user agent sent with every request.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Returns
    /// - `Ok(Client)` - Client ready for use
    /// - `Err(Error::ConfigError)` - Base URL or user agent is empty
    /// - `Err(Error::ReqwestError)` - Underlying HTTP client could not be constructed
    pub fn build(self) -> Result<Client, Error> {
        if self.base_url.is_empty() {
            return Err(Error::ConfigError("base URL must not be empty".to_string()));
        }
        if self.user_agent.is_empty() {
            return Err(Error::ConfigError("user agent must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;

        Ok(Client {
            inner: Arc::new(ClientRef {
                http,
                base_url: self.base_url,
            }),
        })
    }
}
