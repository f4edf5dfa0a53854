use nba_stats_fetcher::{PlayerIdentity, StatCategory, StatsProvider};
use player_registry::PlayerRegistry;
use tracing::{info, warn};

use crate::calculator::{RosterAggregator, SeasonAverager, WeeklyProjector};
use crate::comparison::RosterComparator;
use crate::error::{EngineError, Result};
use crate::models::*;
use crate::schedule::{WeekWindow, WeeklySchedule};

/// Orchestrates upstream fetches and projection math for one session
pub struct ProjectionEngine<P: StatsProvider> {
    provider: P,
    registry: PlayerRegistry,
}

impl<P: StatsProvider> ProjectionEngine<P> {
    /// Create an engine without fetching anything yet
    pub fn new(provider: P) -> Self {
        Self { provider, registry: PlayerRegistry::new() }
    }

    /// Fetch the player index and build the engine
    pub async fn load(provider: P) -> Result<Self> {
        let mut engine = Self::new(provider);
        engine.ensure_loaded().await?;
        Ok(engine)
    }

    /// Fetch the player index unless it is already loaded
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        if !self.registry.is_empty() {
            return Ok(());
        }

        info!("Loading player index");
        let players = self.provider.player_index().await?;
        if players.is_empty() {
            return Err(EngineError::EmptyPlayerIndex);
        }

        self.registry.load(players);
        info!("Projection engine ready with {} players", self.registry.len());
        Ok(())
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the league schedule and count each team's games in `window`
    pub async fn weekly_schedule(&self, window: WeekWindow) -> Result<WeeklySchedule> {
        let schedule = self.provider.league_schedule().await?;
        Ok(WeeklySchedule::from_league(&schedule, window))
    }

    /// Average a player's season and project it over the week
    ///
    /// A player with no games logged yields a no-data projection of zeros,
    /// not an error.
    pub async fn project_player(
        &self,
        player: &PlayerIdentity,
        schedule: &WeeklySchedule,
    ) -> Result<PlayerProjection> {
        let games = self.provider.game_log(player.player_id).await?;
        let averages = SeasonAverager::average(&games);

        if averages.is_none() {
            warn!("No games logged for {} ({})", player.full_name, player.player_id);
        }

        let identity = self.current_team(player).await?;
        let games_in_week = identity.team_id.map(|team| schedule.games_for(team)).unwrap_or(0);
        let projection = WeeklyProjector::project_optional(averages.as_ref(), games_in_week);

        info!(
            "Projected {} over {} games: {:.2} PTS",
            identity.full_name,
            games_in_week,
            projection.get(StatCategory::Points)
        );

        Ok(PlayerProjection { player: identity, averages, projection })
    }

    /// Project every player on a roster against an already fetched schedule
    ///
    /// Players whose upstream data cannot be fetched are reported as failures
    /// and left out of the totals.
    pub async fn project_roster_with(
        &self,
        players: &[PlayerIdentity],
        schedule: &WeeklySchedule,
    ) -> RosterReport {
        let mut projections = Vec::with_capacity(players.len());
        let mut failures = Vec::new();

        for player in players {
            match self.project_player(player, schedule).await {
                Ok(projection) => projections.push(projection),
                Err(e) => {
                    warn!("Failed to project {}: {}", player.full_name, e);
                    failures.push(PlayerFailure { player: player.clone(), message: e.to_string() });
                }
            }
        }

        let totals = RosterAggregator::aggregate(projections.iter().map(|p| &p.projection));

        RosterReport { window: schedule.window(), players: projections, failures, totals }
    }

    /// Fetch the schedule once and project a roster for `window`
    pub async fn project_roster(
        &self,
        players: &[PlayerIdentity],
        window: WeekWindow,
    ) -> Result<RosterReport> {
        let schedule = self.weekly_schedule(window).await?;
        Ok(self.project_roster_with(players, &schedule).await)
    }

    /// Project two rosters against one schedule fetch and compare them
    pub async fn compare_rosters(
        &self,
        team_a: &[PlayerIdentity],
        team_b: &[PlayerIdentity],
        window: WeekWindow,
    ) -> Result<ComparisonReport> {
        let schedule = self.weekly_schedule(window).await?;

        let team_a = self.project_roster_with(team_a, &schedule).await;
        let team_b = self.project_roster_with(team_b, &schedule).await;
        let comparison = RosterComparator::compare(&team_a.totals, &team_b.totals);

        info!(
            "Compared rosters: Team A leads {}, Team B leads {}, {} tied",
            comparison.team_a_categories, comparison.team_b_categories, comparison.ties
        );

        Ok(ComparisonReport { team_a, team_b, comparison })
    }

    /// Current team from the provider, falling back to the index entry
    async fn current_team(&self, player: &PlayerIdentity) -> Result<PlayerIdentity> {
        match self.provider.player_team(player.player_id).await {
            Ok(identity) => Ok(identity),
            Err(e) if player.team_id.is_some() => {
                warn!("Using indexed team for {} after lookup failure: {}", player.full_name, e);
                Ok(player.clone())
            }
            Err(e) => Err(EngineError::Upstream(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{ComparisonSide, FantasyCategory};
    use crate::schedule::WeekSelection;
    use chrono::NaiveDate;
    use nba_stats_fetcher::{
        FetchError, GameRecord, LeagueSchedule, ScheduleGameDate, ScheduleTeam, ScheduledGame,
        StatLine,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LAL: i64 = 1610612747;
    const BOS: i64 = 1610612738;
    const MIA: i64 = 1610612748;

    #[derive(Default)]
    struct FakeProvider {
        players: Vec<PlayerIdentity>,
        logs: HashMap<i64, Vec<GameRecord>>,
        broken: Vec<i64>,
        schedule: LeagueSchedule,
        schedule_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl StatsProvider for FakeProvider {
        async fn player_index(&self) -> nba_stats_fetcher::Result<Vec<PlayerIdentity>> {
            Ok(self.players.clone())
        }

        async fn game_log(&self, player_id: i64) -> nba_stats_fetcher::Result<Vec<GameRecord>> {
            if self.broken.contains(&player_id) {
                return Err(FetchError::Status { endpoint: "playergamelog".to_string(), status: 500 });
            }
            Ok(self.logs.get(&player_id).cloned().unwrap_or_default())
        }

        async fn player_team(&self, player_id: i64) -> nba_stats_fetcher::Result<PlayerIdentity> {
            self.players
                .iter()
                .find(|p| p.player_id == player_id)
                .cloned()
                .ok_or(FetchError::PlayerNotFound(player_id))
        }

        async fn league_schedule(&self) -> nba_stats_fetcher::Result<LeagueSchedule> {
            self.schedule_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.schedule.clone())
        }
    }

    fn game(points: f64, fgm: f64, fga: f64) -> GameRecord {
        GameRecord {
            game_id: "0022500001".to_string(),
            game_date: "NOV 01, 2025".to_string(),
            matchup: "LAL vs. BOS".to_string(),
            stats: StatLine::new()
                .with(StatCategory::Points, points)
                .with(StatCategory::FieldGoalsMade, fgm)
                .with(StatCategory::FieldGoalsAttempted, fga),
        }
    }

    fn game_day(day: &str, home: i64, away: i64) -> ScheduleGameDate {
        ScheduleGameDate {
            game_date: format!("{day} 00:00:00"),
            games: vec![ScheduledGame {
                game_id: String::new(),
                home_team: ScheduleTeam { team_id: Some(home), team_tricode: None },
                away_team: ScheduleTeam { team_id: Some(away), team_tricode: None },
            }],
        }
    }

    fn window() -> WeekWindow {
        // Monday 2025-11-10 through Sunday 2025-11-16
        WeekSelection::Next.window(NaiveDate::from_ymd_opt(2025, 11, 5).unwrap())
    }

    fn provider() -> FakeProvider {
        let players = vec![
            PlayerIdentity::new(1, "Player A").with_team(LAL, "LAL"),
            PlayerIdentity::new(2, "Player B").with_team(LAL, "LAL"),
            PlayerIdentity::new(3, "Rookie Zero").with_team(BOS, "BOS"),
            PlayerIdentity::new(4, "Bye Week").with_team(MIA, "MIA"),
            PlayerIdentity::new(5, "Broken Feed").with_team(BOS, "BOS"),
        ];

        let mut logs = HashMap::new();
        logs.insert(1, vec![game(10.0, 2.0, 10.0), game(10.0, 2.0, 10.0)]);
        logs.insert(2, vec![game(15.0, 45.0, 50.0), game(25.0, 45.0, 50.0)]);
        logs.insert(4, vec![game(30.0, 10.0, 20.0)]);

        let schedule = LeagueSchedule {
            season_year: Some("2025-26".to_string()),
            game_dates: vec![
                game_day("11/10/2025", LAL, BOS),
                game_day("11/12/2025", BOS, LAL),
                game_day("11/14/2025", LAL, BOS),
                game_day("11/20/2025", MIA, LAL),
            ],
        };

        FakeProvider { players, logs, broken: vec![5], schedule, ..Default::default() }
    }

    fn identity(engine: &ProjectionEngine<FakeProvider>, name: &str) -> PlayerIdentity {
        engine.registry().resolve(name).unwrap().clone()
    }

    #[tokio::test]
    async fn test_empty_index_is_an_error() {
        let result = ProjectionEngine::load(FakeProvider::default()).await;
        assert!(matches!(result, Err(EngineError::EmptyPlayerIndex)));
    }

    #[tokio::test]
    async fn test_roster_projection_at_three_games() {
        let engine = ProjectionEngine::load(provider()).await.unwrap();
        let roster = vec![identity(&engine, "Player A"), identity(&engine, "Player B")];

        let report = engine.project_roster(&roster, window()).await.unwrap();

        assert_eq!(report.players.len(), 2);
        assert_eq!(report.players[0].games_in_week(), 3);
        assert_eq!(report.players[0].averages.as_ref().unwrap().get(StatCategory::Points), 10.0);
        assert_eq!(report.players[1].averages.as_ref().unwrap().get(StatCategory::Points), 20.0);
        assert_eq!(report.players[0].projection.get(StatCategory::Points), 30.0);
        assert_eq!(report.players[1].projection.get(StatCategory::Points), 60.0);
        assert_eq!(report.totals.get(StatCategory::Points), 90.0);

        // 6/30 and 135/150 summed, not the mean of 20% and 90%
        let fg_pct = report.totals.field_goal_pct().unwrap();
        assert!((fg_pct - 141.0 / 180.0 * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_player_without_games_reports_no_data() {
        let engine = ProjectionEngine::load(provider()).await.unwrap();
        let roster = vec![identity(&engine, "Rookie Zero"), identity(&engine, "Player A")];

        let report = engine.project_roster(&roster, window()).await.unwrap();

        let rookie = &report.players[0];
        assert!(!rookie.has_data());
        assert_eq!(rookie.games_in_week(), 3);
        assert_eq!(rookie.projection.get(StatCategory::Points), 0.0);
        assert_eq!(report.players_without_data().count(), 1);

        // Other players are unaffected
        assert_eq!(report.players[1].projection.get(StatCategory::Points), 30.0);
        assert_eq!(report.totals.get(StatCategory::Points), 30.0);
    }

    #[tokio::test]
    async fn test_team_without_games_projects_zero() {
        let engine = ProjectionEngine::load(provider()).await.unwrap();
        let roster = vec![identity(&engine, "Bye Week")];

        let report = engine.project_roster(&roster, window()).await.unwrap();

        let player = &report.players[0];
        assert!(player.has_data());
        assert_eq!(player.games_in_week(), 0);
        assert_eq!(player.projection.get(StatCategory::Points), 0.0);
        assert_eq!(report.totals.field_goal_pct(), None);
    }

    #[tokio::test]
    async fn test_upstream_failure_excludes_only_that_player() {
        let engine = ProjectionEngine::load(provider()).await.unwrap();
        let roster = vec![identity(&engine, "Broken Feed"), identity(&engine, "Player B")];

        let report = engine.project_roster(&roster, window()).await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].player.full_name, "Broken Feed");
        assert!(report.failures[0].message.contains("500"));
        assert_eq!(report.players.len(), 1);
        assert_eq!(report.totals.players, 1);
        assert_eq!(report.totals.get(StatCategory::Points), 60.0);
    }

    #[tokio::test]
    async fn test_compare_rosters_fetches_schedule_once() {
        let engine = ProjectionEngine::load(provider()).await.unwrap();
        let team_a = vec![identity(&engine, "Player B")];
        let team_b = vec![identity(&engine, "Player A"), identity(&engine, "Rookie Zero")];

        let report = engine.compare_rosters(&team_a, &team_b, window()).await.unwrap();

        assert_eq!(engine.provider().schedule_calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.team_a.window, report.team_b.window);

        let points = report.comparison.row(FantasyCategory::Counting(StatCategory::Points)).unwrap();
        assert_eq!(points.team_a, Some(60.0));
        assert_eq!(points.team_b, Some(30.0));
        assert_eq!(points.leader, Some(ComparisonSide::TeamA));
        assert_eq!(report.comparison.leader(), ComparisonSide::TeamA);
    }
}
