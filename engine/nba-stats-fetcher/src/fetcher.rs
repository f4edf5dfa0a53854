use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use crate::models::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration as StdDuration;
use tracing::{debug, info, warn};

/// HTTP client for the NBA stats and schedule endpoints
pub struct NbaStatsFetcher {
    config: FetcherConfig,
    client: Client,
}

impl NbaStatsFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FetcherConfig) -> Result<Self> {
        config.validate().map_err(|e| FetchError::Config(e.to_string()))?;

        // stats.nba.com drops requests that don't look like they came from nba.com
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));

        let client = Client::builder()
            .timeout(StdDuration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch the player index for the configured season
    pub async fn fetch_player_index(&self) -> Result<Vec<PlayerIdentity>> {
        let current_only = if self.config.only_current_season_players { "1" } else { "0" };
        let response: StatsResponse = self
            .get_stats(
                "commonallplayers",
                &[
                    ("LeagueID", self.config.league_id.as_str()),
                    ("Season", self.config.season.as_str()),
                    ("IsOnlyCurrentSeason", current_only),
                ],
            )
            .await?;

        let rows: Vec<PlayerIndexRow> =
            response.result_set("CommonAllPlayers", "commonallplayers")?.rows_as()?;
        let total = rows.len();

        let players: Vec<PlayerIdentity> = rows
            .into_iter()
            .filter(|row| !self.config.only_current_season_players || row.is_rostered())
            .map(PlayerIndexRow::into_identity)
            .collect();

        info!("Fetched player index: {} players ({} rows)", players.len(), total);
        Ok(players)
    }

    /// Fetch a player's game log for the configured season
    pub async fn fetch_player_game_log(&self, player_id: i64) -> Result<Vec<GameRecord>> {
        let player_id_param = player_id.to_string();
        let response: StatsResponse = self
            .get_stats(
                "playergamelog",
                &[
                    ("PlayerID", player_id_param.as_str()),
                    ("Season", self.config.season.as_str()),
                    ("SeasonType", self.config.season_type.as_str()),
                ],
            )
            .await?;

        let rows: Vec<GameLogRow> =
            response.result_set("PlayerGameLog", "playergamelog")?.rows_as()?;
        let records: Vec<GameRecord> = rows.into_iter().map(GameLogRow::into_game_record).collect();

        info!(
            "Fetched {} games for player {} ({})",
            records.len(),
            player_id,
            self.config.season
        );
        Ok(records)
    }

    /// Fetch a player's current team
    pub async fn fetch_player_team(&self, player_id: i64) -> Result<PlayerIdentity> {
        let player_id_param = player_id.to_string();
        let response: StatsResponse = self
            .get_stats("commonplayerinfo", &[("PlayerID", player_id_param.as_str())])
            .await?;

        let rows: Vec<PlayerInfoRow> =
            response.result_set("CommonPlayerInfo", "commonplayerinfo")?.rows_as()?;

        let identity = rows
            .into_iter()
            .next()
            .map(PlayerInfoRow::into_identity)
            .ok_or(FetchError::PlayerNotFound(player_id))?;

        if identity.team_id.is_none() {
            warn!("Player {} ({}) has no current team", identity.full_name, player_id);
        }

        Ok(identity)
    }

    /// Fetch the full league schedule
    pub async fn fetch_league_schedule(&self) -> Result<LeagueSchedule> {
        let url = &self.config.schedule_url;
        info!("Fetching league schedule from: {}", url);

        let response: LeagueScheduleResponse = self.get_json(url, "schedule", &[]).await?;
        let schedule = response.league_schedule;

        info!(
            "Fetched league schedule: {} game dates (season {})",
            schedule.game_dates.len(),
            schedule.season_year.as_deref().unwrap_or("unknown")
        );
        Ok(schedule)
    }

    async fn get_stats<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.config.stats_endpoint(endpoint);
        self.get_json(&url, endpoint, query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(endpoint, e))
    }
}
