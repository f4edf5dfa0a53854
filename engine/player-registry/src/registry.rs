use crate::types::LookupError;
use nba_stats_fetcher::PlayerIdentity;
use std::collections::HashMap;
use tracing::{debug, info};

/// Player Registry - Maps typed names to NBA player identities
///
/// Built from the upstream player index. Lookups are case-insensitive and
/// ignore surrounding whitespace.
pub struct PlayerRegistry {
    /// All players, sorted by full name
    players: Vec<PlayerIdentity>,

    /// Map from player ID to index in `players`
    by_id: HashMap<i64, usize>,

    /// Map from lowercase full name to indices in `players`
    by_name: HashMap<String, Vec<usize>>,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { players: Vec::new(), by_id: HashMap::new(), by_name: HashMap::new() }
    }

    /// Build a registry from an upstream player index
    pub fn from_players(players: Vec<PlayerIdentity>) -> Self {
        let mut registry = Self::new();
        registry.load(players);
        registry
    }

    /// Replace the registry contents with a new player index
    pub fn load(&mut self, mut players: Vec<PlayerIdentity>) {
        // One entry per player id, first listing wins
        players.sort_by_key(|p| p.player_id);
        players.dedup_by_key(|p| p.player_id);
        players.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.player_id.cmp(&b.player_id)));

        self.by_id.clear();
        self.by_name.clear();

        for (index, player) in players.iter().enumerate() {
            self.by_id.insert(player.player_id, index);
            self.by_name.entry(normalize(&player.full_name)).or_default().push(index);
        }

        self.players = players;
        info!("Player registry loaded with {} players", self.players.len());
    }

    /// Get a player by NBA player ID
    pub fn get_by_id(&self, player_id: i64) -> Result<&PlayerIdentity, LookupError> {
        self.by_id
            .get(&player_id)
            .map(|index| &self.players[*index])
            .ok_or(LookupError::InvalidPlayerId(player_id))
    }

    /// Get a player by exact full name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<&PlayerIdentity, LookupError> {
        let key = normalize(name);
        match self.by_name.get(&key).map(Vec::as_slice) {
            Some([index]) => Ok(&self.players[*index]),
            Some(indices) if !indices.is_empty() => Err(LookupError::Ambiguous {
                query: name.trim().to_string(),
                candidates: indices.iter().map(|i| self.players[*i].clone()).collect(),
            }),
            _ => Err(LookupError::PlayerNotFound(name.trim().to_string())),
        }
    }

    /// Search for players by partial name match, sorted by name
    pub fn search_players(&self, query: &str) -> Vec<&PlayerIdentity> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        self.players.iter().filter(|player| normalize(&player.full_name).contains(&query)).collect()
    }

    /// Resolve a typed name to a single player
    ///
    /// An exact full-name match wins even when the query is also a substring
    /// of other names. Otherwise a single partial match is accepted and
    /// several partial matches are reported as ambiguous.
    pub fn resolve(&self, query: &str) -> Result<&PlayerIdentity, LookupError> {
        if normalize(query).is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        match self.get_by_name(query) {
            Ok(player) => return Ok(player),
            Err(LookupError::PlayerNotFound(_)) => {}
            Err(other) => return Err(other),
        }

        let matches = self.search_players(query);
        debug!("'{}' partially matches {} players", query.trim(), matches.len());

        match matches.len() {
            0 => Err(LookupError::PlayerNotFound(query.trim().to_string())),
            1 => Ok(matches[0]),
            _ => Err(LookupError::Ambiguous {
                query: query.trim().to_string(),
                candidates: matches.into_iter().cloned().collect(),
            }),
        }
    }

    /// All players, sorted by name
    pub fn players(&self) -> &[PlayerIdentity] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase with internal whitespace collapsed
fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
