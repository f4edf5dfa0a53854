//! Upstream data provider seam

use crate::error::Result;
use crate::fetcher::NbaStatsFetcher;
use crate::models::{GameRecord, LeagueSchedule, PlayerIdentity};

/// Read-only source of player identities, game logs and the league schedule
#[async_trait::async_trait]
pub trait StatsProvider: Send + Sync {
    /// All players known to the provider
    async fn player_index(&self) -> Result<Vec<PlayerIdentity>>;

    /// Season game log for a player, oldest first as the provider returns it
    async fn game_log(&self, player_id: i64) -> Result<Vec<GameRecord>>;

    /// Player identity with current team
    async fn player_team(&self, player_id: i64) -> Result<PlayerIdentity>;

    /// Full league schedule
    async fn league_schedule(&self) -> Result<LeagueSchedule>;
}

#[async_trait::async_trait]
impl StatsProvider for NbaStatsFetcher {
    async fn player_index(&self) -> Result<Vec<PlayerIdentity>> {
        self.fetch_player_index().await
    }

    async fn game_log(&self, player_id: i64) -> Result<Vec<GameRecord>> {
        self.fetch_player_game_log(player_id).await
    }

    async fn player_team(&self, player_id: i64) -> Result<PlayerIdentity> {
        self.fetch_player_team(player_id).await
    }

    async fn league_schedule(&self) -> Result<LeagueSchedule> {
        self.fetch_league_schedule().await
    }
}
