use nba_stats_fetcher::{FetcherConfig, NbaStatsFetcher};
use player_registry::{LookupError, PlayerRegistry};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Testing PlayerRegistry...");

    let fetcher = NbaStatsFetcher::new(FetcherConfig::from_env()?)?;
    let registry = PlayerRegistry::from_players(fetcher.fetch_player_index().await?);

    info!("Registry loaded with {} players", registry.len());

    let queries: Vec<String> = std::env::args().skip(1).collect();
    let queries = if queries.is_empty() {
        vec!["LeBron James".to_string(), "curry".to_string(), "williams".to_string()]
    } else {
        queries
    };

    for query in &queries {
        println!("\nResolving '{query}':");
        match registry.resolve(query) {
            Ok(player) => println!(
                "  {} (ID {}) - {}",
                player.full_name,
                player.player_id,
                player.team_abbreviation.as_deref().unwrap_or("FA")
            ),
            Err(LookupError::Ambiguous { candidates, .. }) => {
                for player in candidates {
                    println!("  ? {} (ID {})", player.full_name, player.player_id);
                }
            }
            Err(e) => println!("  {e}"),
        }
    }

    info!("PlayerRegistry test completed successfully!");
    Ok(())
}
