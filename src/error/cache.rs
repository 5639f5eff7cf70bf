use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// A mirrored payload could not be encoded or decoded.
    #[error("Failed to (de)serialize cache payload for key {key}: {source}")]
    Payload {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The load was cancelled because a newer refresh superseded it.
    #[error("Cache load for key {0} was cancelled")]
    Cancelled(String),
}
