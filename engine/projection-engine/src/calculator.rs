use crate::models::*;
use nba_stats_fetcher::{GameRecord, StatCategory, StatLine};
use std::collections::BTreeMap;
use tracing::debug;

/// Computes per-game season averages from a game log
pub struct SeasonAverager;

impl SeasonAverager {
    /// Mean of each stat across the records that carry it
    ///
    /// Makes and attempts are only counted from records that carry both, so
    /// per-game makes over per-game attempts stays the season shooting rate.
    /// Returns `None` for an empty log so callers report "no data" instead of
    /// dividing by zero.
    pub fn average(records: &[GameRecord]) -> Option<SeasonAverages> {
        if records.is_empty() {
            return None;
        }

        let mut sums: BTreeMap<StatCategory, (f64, usize)> = BTreeMap::new();
        for record in records {
            for (category, value) in record.stats.iter() {
                if let Some(partner) = shooting_partner(category) {
                    if !record.stats.contains(partner) {
                        continue;
                    }
                }
                let entry = sums.entry(category).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let per_game: StatLine =
            sums.into_iter().map(|(category, (sum, count))| (category, sum / count as f64)).collect();

        debug!("Averaged {} games over {} categories", records.len(), per_game.len());

        Some(SeasonAverages { games_played: records.len(), per_game })
    }
}

/// The other half of a made/attempted pair
fn shooting_partner(category: StatCategory) -> Option<StatCategory> {
    match category {
        StatCategory::FieldGoalsMade => Some(StatCategory::FieldGoalsAttempted),
        StatCategory::FieldGoalsAttempted => Some(StatCategory::FieldGoalsMade),
        StatCategory::FreeThrowsMade => Some(StatCategory::FreeThrowsAttempted),
        StatCategory::FreeThrowsAttempted => Some(StatCategory::FreeThrowsMade),
        _ => None,
    }
}

/// Scales season averages by a week's game count
pub struct WeeklyProjector;

impl WeeklyProjector {
    /// Every per-game stat multiplied by `games`
    pub fn project(averages: &SeasonAverages, games: u32) -> WeeklyProjection {
        WeeklyProjection { games, totals: averages.per_game.scaled(f64::from(games)) }
    }

    /// Projection for a player who may have no games logged
    pub fn project_optional(averages: Option<&SeasonAverages>, games: u32) -> WeeklyProjection {
        match averages {
            Some(averages) => Self::project(averages, games),
            None => WeeklyProjection::empty(games),
        }
    }
}

/// Sums weekly projections across a roster
pub struct RosterAggregator;

impl RosterAggregator {
    /// Component-wise sum of the projections. Percentages are read off the
    /// summed makes and attempts by [`RosterProjection`].
    pub fn aggregate<'a, I>(projections: I) -> RosterProjection
    where
        I: IntoIterator<Item = &'a WeeklyProjection>,
    {
        let mut totals: StatLine = StatCategory::ALL.iter().map(|c| (*c, 0.0)).collect();
        let mut players = 0;

        for projection in projections {
            totals += &projection.totals;
            players += 1;
        }

        RosterProjection { players, totals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn game(points: f64) -> GameRecord {
        GameRecord {
            game_id: format!("G{points}"),
            game_date: "OCT 22, 2025".to_string(),
            matchup: "BOS vs. PHI".to_string(),
            stats: StatLine::new().with(StatCategory::Points, points),
        }
    }

    fn shooting_game(fgm: f64, fga: f64, ftm: f64, fta: f64) -> GameRecord {
        GameRecord {
            game_id: "G".to_string(),
            game_date: "OCT 22, 2025".to_string(),
            matchup: "BOS vs. PHI".to_string(),
            stats: StatLine::new()
                .with(StatCategory::FieldGoalsMade, fgm)
                .with(StatCategory::FieldGoalsAttempted, fga)
                .with(StatCategory::FreeThrowsMade, ftm)
                .with(StatCategory::FreeThrowsAttempted, fta),
        }
    }

    #[test]
    fn test_empty_log_has_no_averages() {
        assert_eq!(SeasonAverager::average(&[]), None);
    }

    #[test]
    fn test_single_game_average_is_exact() {
        let averages = SeasonAverager::average(&[game(37.0)]).unwrap();
        assert_eq!(averages.games_played, 1);
        assert_eq!(averages.get(StatCategory::Points), 37.0);
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let a = SeasonAverager::average(&[game(10.0), game(10.0)]).unwrap();
        let b = SeasonAverager::average(&[game(15.0), game(25.0)]).unwrap();
        assert_eq!(a.get(StatCategory::Points), 10.0);
        assert_eq!(b.get(StatCategory::Points), 20.0);
    }

    #[test]
    fn test_missing_stat_averages_over_games_that_carry_it() {
        let mut partial = game(20.0);
        partial.stats.set(StatCategory::Rebounds, 8.0);

        let averages = SeasonAverager::average(&[partial, game(30.0)]).unwrap();
        assert_eq!(averages.get(StatCategory::Points), 25.0);
        assert_eq!(averages.get(StatCategory::Rebounds), 8.0);
    }

    #[test]
    fn test_season_shooting_uses_summed_makes_and_attempts() {
        // 1/2 and 9/10: mean of percentages would be 70%, true rate is 10/12
        let averages =
            SeasonAverager::average(&[shooting_game(1.0, 2.0, 0.0, 0.0), shooting_game(9.0, 10.0, 3.0, 4.0)])
                .unwrap();
        let fg_pct = averages.field_goals().percentage().unwrap();
        assert!((fg_pct - 10.0 / 12.0 * 100.0).abs() < 1e-9);
        assert!((averages.free_throws().percentage().unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_unpaired_makes_are_left_out_of_shooting_averages() {
        let mut makes_only = game(12.0);
        makes_only.stats.set(StatCategory::FieldGoalsMade, 8.0);

        let averages =
            SeasonAverager::average(&[shooting_game(5.0, 10.0, 2.0, 4.0), makes_only]).unwrap();

        assert_eq!(averages.get(StatCategory::FieldGoalsMade), 5.0);
        assert_eq!(averages.get(StatCategory::FieldGoalsAttempted), 10.0);
        assert!((averages.field_goals().percentage().unwrap() - 50.0).abs() < 1e-9);
        // Other stats still average over every game carrying them
        assert_eq!(averages.get(StatCategory::Points), 12.0);
    }

    #[test]
    fn test_projection_at_zero_games_is_all_zero() {
        let averages = SeasonAverager::average(&[game(25.0), shooting_game(8.0, 16.0, 2.0, 2.0)]).unwrap();
        let projection = WeeklyProjector::project(&averages, 0);

        assert_eq!(projection.games, 0);
        assert!(projection.totals.iter().all(|(_, value)| value == 0.0));
        assert_eq!(projection.field_goals().percentage(), None);
    }

    #[test]
    fn test_projection_scales_by_game_count() {
        let averages = SeasonAverager::average(&[game(15.0), game(25.0)]).unwrap();
        let projection = WeeklyProjector::project(&averages, 3);
        assert_eq!(projection.get(StatCategory::Points), 60.0);
    }

    #[test]
    fn test_no_data_player_projects_to_zero() {
        let projection = WeeklyProjector::project_optional(None, 4);
        assert_eq!(projection.games, 4);
        assert_eq!(projection.get(StatCategory::Points), 0.0);
        assert_eq!(projection.totals.len(), StatCategory::ALL.len());
    }

    #[test]
    fn test_roster_projection_example() {
        let a = SeasonAverager::average(&[game(10.0), game(10.0)]).unwrap();
        let b = SeasonAverager::average(&[game(15.0), game(25.0)]).unwrap();
        let pa = WeeklyProjector::project(&a, 3);
        let pb = WeeklyProjector::project(&b, 3);

        assert_eq!(pa.get(StatCategory::Points), 30.0);
        assert_eq!(pb.get(StatCategory::Points), 60.0);

        let roster = RosterAggregator::aggregate([&pa, &pb]);
        assert_eq!(roster.players, 2);
        assert_eq!(roster.get(StatCategory::Points), 90.0);
    }

    #[test]
    fn test_roster_percentage_from_summed_components() {
        // Player A: 2/10 FG, Player B: 45/50 FG
        let a = SeasonAverager::average(&[shooting_game(2.0, 10.0, 1.0, 1.0)]).unwrap();
        let b = SeasonAverager::average(&[shooting_game(45.0, 50.0, 5.0, 10.0)]).unwrap();
        let pa = WeeklyProjector::project(&a, 1);
        let pb = WeeklyProjector::project(&b, 1);

        let roster = RosterAggregator::aggregate([&pa, &pb]);
        let fg_pct = roster.field_goal_pct().unwrap();
        let mean_of_pcts =
            (pa.field_goals().percentage().unwrap() + pb.field_goals().percentage().unwrap()) / 2.0;

        assert!((fg_pct - 47.0 / 60.0 * 100.0).abs() < 1e-9);
        assert!((mean_of_pcts - 55.0).abs() < 1e-9);
        assert!((fg_pct - mean_of_pcts).abs() > 20.0);

        let ft_pct = roster.free_throw_pct().unwrap();
        assert!((ft_pct - 6.0 / 11.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_roster_has_no_percentages() {
        let roster = RosterAggregator::aggregate(std::iter::empty());
        assert_eq!(roster.players, 0);
        assert_eq!(roster.get(StatCategory::Points), 0.0);
        assert_eq!(roster.field_goal_pct(), None);
        assert_eq!(roster.free_throw_pct(), None);
    }

    proptest! {
        #[test]
        fn prop_average_matches_mean(points in prop::collection::vec(0u32..80, 1..82)) {
            let records: Vec<GameRecord> = points.iter().map(|p| game(f64::from(*p))).collect();
            let averages = SeasonAverager::average(&records).unwrap();
            let expected = points.iter().map(|p| f64::from(*p)).sum::<f64>() / points.len() as f64;
            prop_assert!((averages.get(StatCategory::Points) - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_projection_is_linear_in_games(
            points in prop::collection::vec(0u32..80, 1..20),
            games in 0u32..8,
        ) {
            let records: Vec<GameRecord> = points.iter().map(|p| game(f64::from(*p))).collect();
            let averages = SeasonAverager::average(&records).unwrap();
            let projection = WeeklyProjector::project(&averages, games);
            for (category, value) in averages.per_game.iter() {
                prop_assert_eq!(projection.get(category), value * f64::from(games));
            }
        }
    }
}
