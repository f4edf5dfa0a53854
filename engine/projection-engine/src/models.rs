use nba_stats_fetcher::{PlayerIdentity, ShootingSplit, StatCategory, StatLine};
use serde::Serialize;

use crate::schedule::WeekWindow;

/// Per-game means over a player's season game log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAverages {
    /// Number of games averaged over
    pub games_played: usize,

    /// Mean of each stat across the games that carry it
    pub per_game: StatLine,
}

impl SeasonAverages {
    pub fn get(&self, category: StatCategory) -> f64 {
        self.per_game.get(category)
    }

    /// Per-game makes over per-game attempts. Both are averaged over the same
    /// games, so this equals season makes over season attempts.
    pub fn field_goals(&self) -> ShootingSplit {
        self.per_game.field_goals()
    }

    pub fn free_throws(&self) -> ShootingSplit {
        self.per_game.free_throws()
    }
}

/// Season averages scaled by a team's game count for one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProjection {
    /// Games the player's team plays in the week
    pub games: u32,

    /// Projected weekly totals
    pub totals: StatLine,
}

impl WeeklyProjection {
    /// All-zero projection, used for players without games logged
    pub fn empty(games: u32) -> Self {
        Self { games, totals: StatCategory::ALL.iter().map(|c| (*c, 0.0)).collect() }
    }

    pub fn get(&self, category: StatCategory) -> f64 {
        self.totals.get(category)
    }

    pub fn field_goals(&self) -> ShootingSplit {
        self.totals.field_goals()
    }

    pub fn free_throws(&self) -> ShootingSplit {
        self.totals.free_throws()
    }
}

/// One player's averages and weekly projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProjection {
    pub player: PlayerIdentity,

    /// `None` when the player has no games logged this season
    pub averages: Option<SeasonAverages>,

    pub projection: WeeklyProjection,
}

impl PlayerProjection {
    pub fn has_data(&self) -> bool {
        self.averages.is_some()
    }

    pub fn games_in_week(&self) -> u32 {
        self.projection.games
    }
}

/// Sum of weekly projections across a roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterProjection {
    /// Number of players summed
    pub players: usize,

    /// Summed counting stats, makes and attempts included
    pub totals: StatLine,
}

impl RosterProjection {
    pub fn get(&self, category: StatCategory) -> f64 {
        self.totals.get(category)
    }

    /// Summed field goals made over summed attempts
    pub fn field_goals(&self) -> ShootingSplit {
        self.totals.field_goals()
    }

    /// Summed free throws made over summed attempts
    pub fn free_throws(&self) -> ShootingSplit {
        self.totals.free_throws()
    }

    pub fn field_goal_pct(&self) -> Option<f64> {
        self.field_goals().percentage()
    }

    pub fn free_throw_pct(&self) -> Option<f64> {
        self.free_throws().percentage()
    }
}

/// A roster entry whose upstream data could not be fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerFailure {
    pub player: PlayerIdentity,
    pub message: String,
}

/// Everything produced for one roster in one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterReport {
    pub window: WeekWindow,
    pub players: Vec<PlayerProjection>,
    pub failures: Vec<PlayerFailure>,
    pub totals: RosterProjection,
}

impl RosterReport {
    /// Players that contributed no stats because they have no games logged
    pub fn players_without_data(&self) -> impl Iterator<Item = &PlayerProjection> {
        self.players.iter().filter(|p| !p.has_data())
    }
}

/// Two roster reports for the same week plus their category comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub team_a: RosterReport,
    pub team_b: RosterReport,
    pub comparison: crate::comparison::RosterComparison,
}
