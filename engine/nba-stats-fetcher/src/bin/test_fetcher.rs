use nba_stats_fetcher::{FetcherConfig, NbaStatsFetcher};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Testing NBA stats fetcher");

    let config = FetcherConfig::from_env()?;
    info!("Loaded configuration for season {}", config.season);

    let fetcher = NbaStatsFetcher::new(config)?;

    info!("Testing player index fetch...");
    let players = match fetcher.fetch_player_index().await {
        Ok(players) => {
            info!("✅ Successfully fetched {} players", players.len());
            for (i, player) in players.iter().take(3).enumerate() {
                info!(
                    "  {}. {} ({}) - {}",
                    i + 1,
                    player.full_name,
                    player.player_id,
                    player.team_abbreviation.as_deref().unwrap_or("FA")
                );
            }
            players
        }
        Err(e) => {
            error!("❌ Failed to fetch player index: {}", e);
            Vec::new()
        }
    };

    // Player id from the command line, otherwise the first indexed player
    let player_id = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<i64>().ok())
        .or_else(|| players.first().map(|p| p.player_id));

    if let Some(player_id) = player_id {
        info!("Testing game log fetch for player {}...", player_id);
        match fetcher.fetch_player_game_log(player_id).await {
            Ok(games) => {
                info!("✅ Successfully fetched {} games", games.len());
                for game in games.iter().take(3) {
                    info!("  {} {} - {:?}", game.game_date, game.matchup, game.stats);
                }
            }
            Err(e) => error!("❌ Failed to fetch game log: {}", e),
        }
    }

    info!("Testing league schedule fetch...");
    match fetcher.fetch_league_schedule().await {
        Ok(schedule) => {
            let games: usize = schedule.game_dates.iter().map(|d| d.games.len()).sum();
            info!("✅ Successfully fetched {} game dates ({} games)", schedule.game_dates.len(), games);
        }
        Err(e) => error!("❌ Failed to fetch league schedule: {}", e),
    }

    info!("Test completed!");
    Ok(())
}
