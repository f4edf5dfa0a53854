//! Calendar week windows and per-team game counts

use chrono::{Datelike, Duration, NaiveDate};
use nba_stats_fetcher::LeagueSchedule;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Which calendar week to project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeekSelection {
    /// Today through Sunday
    Current,
    /// Next Monday through the following Sunday
    Next,
}

impl WeekSelection {
    /// Parse the menu choice ("1" = current, "2" = next)
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(WeekSelection::Current),
            "2" => Some(WeekSelection::Next),
            _ => None,
        }
    }

    /// Inclusive date range of the selected week relative to `today`
    pub fn window(self, today: NaiveDate) -> WeekWindow {
        let days_from_monday = i64::from(today.weekday().num_days_from_monday());
        match self {
            WeekSelection::Current => {
                WeekWindow { start: today, end: today + Duration::days(6 - days_from_monday) }
            }
            WeekSelection::Next => {
                // On a Monday this is the following Monday, never today
                let start = today + Duration::days(7 - days_from_monday);
                WeekWindow { start, end: start + Duration::days(6) }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekSelection::Current => "current week",
            WeekSelection::Next => "next week",
        }
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Games per team inside one week window
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySchedule {
    window: WeekWindow,
    games_by_team: HashMap<i64, u32>,
}

impl WeeklySchedule {
    /// Count home and away games for every team within `window`
    pub fn from_league(schedule: &LeagueSchedule, window: WeekWindow) -> Self {
        let mut games_by_team: HashMap<i64, u32> = HashMap::new();

        for game_date in &schedule.game_dates {
            let Some(date) = game_date.date() else {
                warn!("Skipping schedule entry with unparsable date '{}'", game_date.game_date);
                continue;
            };

            if !window.contains(date) {
                continue;
            }

            for game in &game_date.games {
                for team_id in game.team_ids() {
                    *games_by_team.entry(team_id).or_insert(0) += 1;
                }
            }
        }

        debug!("{} teams play between {}", games_by_team.len(), window);
        Self { window, games_by_team }
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    /// Games a team plays in the window; zero for teams without games
    pub fn games_for(&self, team_id: i64) -> u32 {
        self.games_by_team.get(&team_id).copied().unwrap_or(0)
    }

    /// (team_id, games) pairs sorted by team ID
    pub fn entries(&self) -> Vec<(i64, u32)> {
        let mut entries: Vec<(i64, u32)> = self.games_by_team.iter().map(|(t, g)| (*t, *g)).collect();
        entries.sort_unstable();
        entries
    }
}
