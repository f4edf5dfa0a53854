use nba_stats_fetcher::PlayerIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during player lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupError {
    /// No player matches the query
    PlayerNotFound(String),

    /// Several players match the query and none matches exactly
    Ambiguous { query: String, candidates: Vec<PlayerIdentity> },

    /// Invalid player ID
    InvalidPlayerId(i64),

    /// Blank query
    EmptyQuery,
}

impl LookupError {
    /// Candidates of an ambiguous lookup, empty otherwise
    pub fn candidates(&self) -> &[PlayerIdentity] {
        match self {
            LookupError::Ambiguous { candidates, .. } => candidates,
            _ => &[],
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::PlayerNotFound(name) => {
                write!(f, "No players found for '{name}'")
            }
            LookupError::Ambiguous { query, candidates } => {
                write!(f, "'{query}' matches {} players", candidates.len())
            }
            LookupError::InvalidPlayerId(id) => {
                write!(f, "Invalid player ID: {id}")
            }
            LookupError::EmptyQuery => {
                write!(f, "Player name must not be empty")
            }
        }
    }
}

impl std::error::Error for LookupError {}
