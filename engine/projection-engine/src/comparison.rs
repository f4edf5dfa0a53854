//! Category-by-category comparison of two roster projections
//!
//! The per-category leader and the tally are presentation aids only. Values
//! are compared raw with no weighting. Only the seven counting categories are
//! scored; FG% and FT% are shown side by side without a leader.

use crate::models::RosterProjection;
use nba_stats_fetcher::StatCategory;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A head-to-head fantasy category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FantasyCategory {
    Counting(StatCategory),
    FieldGoalPct,
    FreeThrowPct,
}

impl FantasyCategory {
    /// Nine-category head-to-head set in display order
    pub const NINE_CAT: [FantasyCategory; 9] = [
        FantasyCategory::Counting(StatCategory::Points),
        FantasyCategory::Counting(StatCategory::Rebounds),
        FantasyCategory::Counting(StatCategory::Assists),
        FantasyCategory::Counting(StatCategory::Steals),
        FantasyCategory::Counting(StatCategory::Blocks),
        FantasyCategory::Counting(StatCategory::Turnovers),
        FantasyCategory::Counting(StatCategory::ThreesMade),
        FantasyCategory::FieldGoalPct,
        FantasyCategory::FreeThrowPct,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FantasyCategory::Counting(category) => category.label(),
            FantasyCategory::FieldGoalPct => "FG%",
            FantasyCategory::FreeThrowPct => "FT%",
        }
    }

    /// Turnovers are the only category where less is better
    pub fn lower_is_better(self) -> bool {
        matches!(self, FantasyCategory::Counting(StatCategory::Turnovers))
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, FantasyCategory::FieldGoalPct | FantasyCategory::FreeThrowPct)
    }

    /// Whether the category counts toward the tally
    pub fn is_scored(self) -> bool {
        !self.is_percentage()
    }

    /// Value of this category for a roster; `None` for a percentage without attempts
    pub fn value(self, roster: &RosterProjection) -> Option<f64> {
        match self {
            FantasyCategory::Counting(category) => Some(roster.get(category)),
            FantasyCategory::FieldGoalPct => roster.field_goal_pct(),
            FantasyCategory::FreeThrowPct => roster.free_throw_pct(),
        }
    }
}

impl fmt::Display for FantasyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which roster leads a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonSide {
    TeamA,
    TeamB,
    Tie,
}

impl fmt::Display for ComparisonSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonSide::TeamA => write!(f, "Team A"),
            ComparisonSide::TeamB => write!(f, "Team B"),
            ComparisonSide::Tie => write!(f, "Tie"),
        }
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: FantasyCategory,
    pub team_a: Option<f64>,
    pub team_b: Option<f64>,

    /// `None` for display-only categories
    pub leader: Option<ComparisonSide>,
}

/// Both rosters side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterComparison {
    pub rows: Vec<CategoryComparison>,
    pub team_a_categories: usize,
    pub team_b_categories: usize,
    pub ties: usize,
}

impl RosterComparison {
    /// Side leading more categories, `Tie` when even
    pub fn leader(&self) -> ComparisonSide {
        match self.team_a_categories.cmp(&self.team_b_categories) {
            Ordering::Greater => ComparisonSide::TeamA,
            Ordering::Less => ComparisonSide::TeamB,
            Ordering::Equal => ComparisonSide::Tie,
        }
    }

    pub fn row(&self, category: FantasyCategory) -> Option<&CategoryComparison> {
        self.rows.iter().find(|row| row.category == category)
    }
}

pub struct RosterComparator;

impl RosterComparator {
    /// Compare two rosters over the nine head-to-head categories
    pub fn compare(team_a: &RosterProjection, team_b: &RosterProjection) -> RosterComparison {
        let rows: Vec<CategoryComparison> = FantasyCategory::NINE_CAT
            .iter()
            .map(|category| {
                let a = category.value(team_a);
                let b = category.value(team_b);
                let leader = match (a, b) {
                    (Some(a), Some(b)) if category.is_scored() => Some(Self::leader(*category, a, b)),
                    _ => None,
                };
                CategoryComparison { category: *category, team_a: a, team_b: b, leader }
            })
            .collect();

        let count = |side: ComparisonSide| rows.iter().filter(|row| row.leader == Some(side)).count();
        let team_a_categories = count(ComparisonSide::TeamA);
        let team_b_categories = count(ComparisonSide::TeamB);
        let ties = count(ComparisonSide::Tie);

        RosterComparison { rows, team_a_categories, team_b_categories, ties }
    }

    fn leader(category: FantasyCategory, a: f64, b: f64) -> ComparisonSide {
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        let ordering = if category.lower_is_better() { ordering.reverse() } else { ordering };
        match ordering {
            Ordering::Greater => ComparisonSide::TeamA,
            Ordering::Less => ComparisonSide::TeamB,
            Ordering::Equal => ComparisonSide::Tie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_stats_fetcher::StatLine;

    fn roster(points: f64, turnovers: f64, fg: (f64, f64), ft: (f64, f64)) -> RosterProjection {
        let totals = StatLine::new()
            .with(StatCategory::Points, points)
            .with(StatCategory::Turnovers, turnovers)
            .with(StatCategory::FieldGoalsMade, fg.0)
            .with(StatCategory::FieldGoalsAttempted, fg.1)
            .with(StatCategory::FreeThrowsMade, ft.0)
            .with(StatCategory::FreeThrowsAttempted, ft.1);
        RosterProjection { players: 1, totals }
    }

    fn full_roster(counts: [f64; 7], fg: (f64, f64), ft: (f64, f64)) -> RosterProjection {
        let mut totals = StatLine::new()
            .with(StatCategory::FieldGoalsMade, fg.0)
            .with(StatCategory::FieldGoalsAttempted, fg.1)
            .with(StatCategory::FreeThrowsMade, ft.0)
            .with(StatCategory::FreeThrowsAttempted, ft.1);
        for (category, value) in FantasyCategory::NINE_CAT.iter().zip(counts) {
            if let FantasyCategory::Counting(stat) = category {
                totals.set(*stat, value);
            }
        }
        RosterProjection { players: 1, totals }
    }

    #[test]
    fn test_higher_counting_stat_leads() {
        let a = roster(120.0, 10.0, (40.0, 90.0), (20.0, 25.0));
        let b = roster(100.0, 10.0, (40.0, 90.0), (20.0, 25.0));
        let comparison = RosterComparator::compare(&a, &b);

        let points = comparison.row(FantasyCategory::Counting(StatCategory::Points)).unwrap();
        assert_eq!(points.leader, Some(ComparisonSide::TeamA));
        assert_eq!(points.team_a, Some(120.0));
        assert_eq!(points.team_b, Some(100.0));
    }

    #[test]
    fn test_fewer_turnovers_lead() {
        let a = roster(100.0, 15.0, (40.0, 90.0), (20.0, 25.0));
        let b = roster(100.0, 9.0, (40.0, 90.0), (20.0, 25.0));
        let comparison = RosterComparator::compare(&a, &b);

        let turnovers = comparison.row(FantasyCategory::Counting(StatCategory::Turnovers)).unwrap();
        assert_eq!(turnovers.leader, Some(ComparisonSide::TeamB));
    }

    #[test]
    fn test_percentages_are_shown_but_not_scored() {
        let a = roster(100.0, 10.0, (45.0, 90.0), (0.0, 0.0));
        let b = roster(100.0, 10.0, (50.0, 90.0), (18.0, 20.0));
        let comparison = RosterComparator::compare(&a, &b);

        let fg = comparison.row(FantasyCategory::FieldGoalPct).unwrap();
        assert_eq!(fg.team_a, Some(50.0));
        assert_eq!(fg.leader, None);

        let ft = comparison.row(FantasyCategory::FreeThrowPct).unwrap();
        assert_eq!(ft.team_a, None);
        assert_eq!(ft.team_b, Some(90.0));
        assert_eq!(ft.leader, None);

        assert_eq!(comparison.team_a_categories + comparison.team_b_categories + comparison.ties, 7);
    }

    #[test]
    fn test_tally_and_overall_leader() {
        let a = roster(120.0, 8.0, (50.0, 90.0), (20.0, 25.0));
        let b = roster(100.0, 12.0, (40.0, 90.0), (15.0, 25.0));
        let comparison = RosterComparator::compare(&a, &b);

        assert_eq!(comparison.rows.len(), 9);
        // PTS and TOV to A; REB, AST, STL, BLK, FG3M are 0 - 0
        assert_eq!(comparison.team_a_categories, 2);
        assert_eq!(comparison.team_b_categories, 0);
        assert_eq!(comparison.ties, 5);
        assert_eq!(comparison.leader(), ComparisonSide::TeamA);
    }

    #[test]
    fn test_winning_percentages_do_not_decide_the_week() {
        // A takes PTS, REB, AST, STL; B takes BLK, TOV, FG3M and both percentages
        let a = full_roster([120.0, 50.0, 30.0, 10.0, 2.0, 15.0, 5.0], (40.0, 100.0), (10.0, 20.0));
        let b = full_roster([100.0, 40.0, 20.0, 5.0, 8.0, 9.0, 12.0], (50.0, 100.0), (18.0, 20.0));
        let comparison = RosterComparator::compare(&a, &b);

        assert_eq!(comparison.team_a_categories, 4);
        assert_eq!(comparison.team_b_categories, 3);
        assert_eq!(comparison.ties, 0);
        assert_eq!(comparison.leader(), ComparisonSide::TeamA);
    }

    #[test]
    fn test_identical_rosters_tie() {
        let a = roster(100.0, 10.0, (40.0, 90.0), (20.0, 25.0));
        let comparison = RosterComparator::compare(&a, &a.clone());
        assert_eq!(comparison.ties, 7);
        assert_eq!(comparison.leader(), ComparisonSide::Tie);
    }
}
