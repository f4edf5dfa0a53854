//! Error types for the NBA stats fetcher

use thiserror::Error;

/// Result alias for fetcher operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while talking to the upstream provider
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Response from {0} contained no result sets")]
    MissingResultSet(String),

    #[error("Player {0} not found upstream")]
    PlayerNotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Build a decode error for an endpoint
    pub fn decode(endpoint: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Decode { endpoint: endpoint.into(), message: message.to_string() }
    }
}
