//! Error types for the projection engine

use nba_stats_fetcher::FetchError;
use player_registry::LookupError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while building projections
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Upstream data provider failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("Player index is empty")]
    EmptyPlayerIndex,
}
