use serde::{Deserialize, Serialize};

/// Configuration for the NBA stats fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Base URL of the stats.nba.com API (no trailing slash)
    pub stats_base_url: String,

    /// Full URL of the league schedule feed
    pub schedule_url: String,

    /// Season in `YYYY-YY` form (e.g., "2025-26")
    pub season: String,

    /// Season type (e.g., "Regular Season", "Playoffs")
    pub season_type: String,

    /// League ID ("00" is the NBA)
    pub league_id: String,

    /// Only index players rostered in the configured season
    pub only_current_season_players: bool,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            stats_base_url: "https://stats.nba.com/stats".to_string(),
            schedule_url: "https://cdn.nba.com/static/json/staticData/scheduleLeagueV2_1.json"
                .to_string(),
            season: "2025-26".to_string(),
            season_type: "Regular Season".to_string(),
            league_id: "00".to_string(),
            only_current_season_players: true,
            request_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("NBA_STATS_BASE_URL") {
            config.stats_base_url = url;
        }

        if let Ok(url) = std::env::var("NBA_SCHEDULE_URL") {
            config.schedule_url = url;
        }

        if let Ok(season) = std::env::var("NBA_SEASON") {
            config.season = season;
        }

        if let Ok(season_type) = std::env::var("NBA_SEASON_TYPE") {
            config.season_type = season_type;
        }

        if let Ok(timeout) = std::env::var("NBA_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid NBA_REQUEST_TIMEOUT_SECS: {}", timeout))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_season_label(&self.season) {
            anyhow::bail!("Invalid season '{}': expected YYYY-YY (e.g., 2025-26)", self.season);
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout must be greater than zero");
        }

        if self.stats_base_url.is_empty() || self.schedule_url.is_empty() {
            anyhow::bail!("Upstream URLs must not be empty");
        }

        Ok(())
    }

    /// Stats endpoint URL for a given endpoint name
    pub fn stats_endpoint(&self, endpoint: &str) -> String {
        format!("{}/{}", self.stats_base_url.trim_end_matches('/'), endpoint)
    }
}

/// `YYYY-YY` where the suffix is the year after the prefix
fn is_season_label(season: &str) -> bool {
    let Some((start, end)) = season.split_once('-') else {
        return false;
    };

    if start.len() != 4 || end.len() != 2 {
        return false;
    }

    match (start.parse::<u32>(), end.parse::<u32>()) {
        (Ok(start), Ok(end)) => (start + 1) % 100 == end,
        _ => false,
    }
}
