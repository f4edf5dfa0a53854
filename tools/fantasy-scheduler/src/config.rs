//! Application configuration management

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use nba_stats_fetcher::FetcherConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "fantasy-scheduler.toml";

/// Prefix of environment overrides, e.g. `FANTASY_FETCHER__SEASON`
pub const ENV_PREFIX: &str = "FANTASY";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream NBA endpoints and season
    pub fetcher: FetcherConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,

    /// Log file path (if None, logs to stderr)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "pretty".to_string(), file: None }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config: AppConfig = Config::builder()
            .add_source(file)
            .add_source(
                // No try_parsing: a league id of "00" must stay a string
                Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.fetcher.validate()?;

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            bail!("Invalid log level '{}', expected one of {:?}", self.logging.level, LOG_LEVELS);
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            bail!("Invalid log format '{}', expected one of {:?}", self.logging.format, LOG_FORMATS);
        }

        Ok(())
    }
}
