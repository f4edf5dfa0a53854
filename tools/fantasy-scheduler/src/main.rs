//! Fantasy Scheduler CLI
//!
//! Loads configuration, sets up logging and runs the interactive projection
//! session against the live NBA stats endpoints.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;

use fantasy_scheduler::{initialize_logging, AppConfig, Prompter, Session};
use nba_stats_fetcher::NbaStatsFetcher;
use projection_engine::ProjectionEngine;

#[derive(Parser)]
#[command(name = "fantasy-scheduler")]
#[command(about = "Weekly NBA fantasy projections from season averages and the league schedule")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Season to project, e.g. 2025-26
    #[arg(short, long)]
    season: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(season) = cli.season {
        config.fetcher.season = season;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate().context("Invalid configuration")?;

    let _guard = initialize_logging(&config.logging)?;
    info!("Starting Fantasy Scheduler v{}", env!("CARGO_PKG_VERSION"));
    info!("Projecting the {} {}", config.fetcher.season, config.fetcher.season_type);

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let fetcher = NbaStatsFetcher::new(config.fetcher).context("Failed to create NBA stats client")?;
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(ProjectionEngine::new(fetcher), prompter, Local::now().date_naive());

    session.run().await?;
    Ok(())
}
