//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The RPC rejected the `getEvents` call outright (bad request or
    /// unknown method). Retrying will not help, so the poll aborts.
    #[error("RPC rejected getEvents ({code}): {message}")]
    Rpc { code: i64, message: String },

    /// A campaign event came back in a shape we could not decode.
    #[error("Undecodable campaign event: {0}")]
    EventDecode(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
