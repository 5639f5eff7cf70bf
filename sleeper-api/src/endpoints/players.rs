use std::collections::HashMap;

use crate::{client::Client, error::Error, model::Player};

/// Player catalog endpoints.
pub struct PlayerEndpoints<'a> {
    client: &'a Client,
}

impl<'a> PlayerEndpoints<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the complete NFL player catalog keyed by Sleeper player id.
    ///
    /// The payload is several megabytes; Sleeper asks consumers to call it at most
    /// once per day.
    pub async fn get_all_players(&self) -> Result<HashMap<String, Player>, Error> {
        self.client.get_json("/players/nfl").await
    }
}
