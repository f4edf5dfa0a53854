use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use crate::error::{FetchError, Result};

/// Counting stats tracked per game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatCategory {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
    #[serde(rename = "STL")]
    Steals,
    #[serde(rename = "BLK")]
    Blocks,
    #[serde(rename = "TOV")]
    Turnovers,
    #[serde(rename = "FG3M")]
    ThreesMade,
    #[serde(rename = "FGM")]
    FieldGoalsMade,
    #[serde(rename = "FGA")]
    FieldGoalsAttempted,
    #[serde(rename = "FTM")]
    FreeThrowsMade,
    #[serde(rename = "FTA")]
    FreeThrowsAttempted,
}

impl StatCategory {
    /// All tracked categories in display order
    pub const ALL: [StatCategory; 11] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
        StatCategory::Turnovers,
        StatCategory::ThreesMade,
        StatCategory::FieldGoalsMade,
        StatCategory::FieldGoalsAttempted,
        StatCategory::FreeThrowsMade,
        StatCategory::FreeThrowsAttempted,
    ];

    /// Upstream column name, also used as the display label
    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Points => "PTS",
            StatCategory::Rebounds => "REB",
            StatCategory::Assists => "AST",
            StatCategory::Steals => "STL",
            StatCategory::Blocks => "BLK",
            StatCategory::Turnovers => "TOV",
            StatCategory::ThreesMade => "FG3M",
            StatCategory::FieldGoalsMade => "FGM",
            StatCategory::FieldGoalsAttempted => "FGA",
            StatCategory::FreeThrowsMade => "FTM",
            StatCategory::FreeThrowsAttempted => "FTA",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A made/attempted pair. Percentages are only ever derived from these.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShootingSplit {
    pub made: f64,
    pub attempted: f64,
}

impl ShootingSplit {
    pub fn new(made: f64, attempted: f64) -> Self {
        Self { made, attempted }
    }

    /// Percentage in the 0-100 range, `None` without attempts
    pub fn percentage(&self) -> Option<f64> {
        if self.attempted > 0.0 {
            Some(self.made / self.attempted * 100.0)
        } else {
            None
        }
    }
}

/// Stat values keyed by category. Missing categories read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine(BTreeMap<StatCategory, f64>);

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a category, or 0.0 when absent
    pub fn get(&self, category: StatCategory) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Value for a category if present
    pub fn value(&self, category: StatCategory) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn set(&mut self, category: StatCategory, value: f64) {
        self.0.insert(category, value);
    }

    pub fn with(mut self, category: StatCategory, value: f64) -> Self {
        self.set(category, value);
        self
    }

    pub fn contains(&self, category: StatCategory) -> bool {
        self.0.contains_key(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Present categories and values in category order
    pub fn iter(&self) -> impl Iterator<Item = (StatCategory, f64)> + '_ {
        self.0.iter().map(|(category, value)| (*category, *value))
    }

    /// Every present value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> StatLine {
        StatLine(self.0.iter().map(|(category, value)| (*category, value * factor)).collect())
    }

    pub fn field_goals(&self) -> ShootingSplit {
        ShootingSplit::new(
            self.get(StatCategory::FieldGoalsMade),
            self.get(StatCategory::FieldGoalsAttempted),
        )
    }

    pub fn free_throws(&self) -> ShootingSplit {
        ShootingSplit::new(
            self.get(StatCategory::FreeThrowsMade),
            self.get(StatCategory::FreeThrowsAttempted),
        )
    }
}

impl AddAssign<&StatLine> for StatLine {
    fn add_assign(&mut self, other: &StatLine) {
        for (category, value) in other.iter() {
            *self.0.entry(category).or_insert(0.0) += value;
        }
    }
}

impl FromIterator<(StatCategory, f64)> for StatLine {
    fn from_iter<I: IntoIterator<Item = (StatCategory, f64)>>(iter: I) -> Self {
        StatLine(iter.into_iter().collect())
    }
}

/// One completed game's stat line for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub game_date: String,
    pub matchup: String,
    pub stats: StatLine,
}

/// A player resolved against the upstream index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// NBA person ID
    pub player_id: i64,

    /// Full display name (e.g., "Jayson Tatum")
    pub full_name: String,

    /// Current team ID, `None` for free agents
    pub team_id: Option<i64>,

    /// Team abbreviation (e.g., "BOS")
    pub team_abbreviation: Option<String>,
}

impl PlayerIdentity {
    pub fn new(player_id: i64, full_name: impl Into<String>) -> Self {
        Self { player_id, full_name: full_name.into(), team_id: None, team_abbreviation: None }
    }

    pub fn with_team(mut self, team_id: i64, abbreviation: impl Into<String>) -> Self {
        self.team_id = Some(team_id);
        self.team_abbreviation = Some(abbreviation.into());
        self
    }
}

// ---------------------------------------------------------------------------
// stats.nba.com tabular envelope
// ---------------------------------------------------------------------------

/// Envelope returned by every stats.nba.com endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", alias = "resultSet")]
    pub result_sets: Vec<ResultSet>,
}

/// A named table of rows
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<serde_json::Value>>,
}

impl StatsResponse {
    /// Find a result set by name, falling back to the first one
    pub fn result_set(&self, name: &str, endpoint: &str) -> Result<&ResultSet> {
        self.result_sets
            .iter()
            .find(|set| set.name == name)
            .or_else(|| self.result_sets.first())
            .ok_or_else(|| FetchError::MissingResultSet(endpoint.to_string()))
    }
}

impl ResultSet {
    /// Deserialize every row by pairing its cells with the headers
    pub fn rows_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.row_set
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> =
                    self.headers.iter().cloned().zip(row.iter().cloned()).collect();
                serde_json::from_value(serde_json::Value::Object(object))
                    .map_err(|e| FetchError::decode(&self.name, e))
            })
            .collect()
    }
}

/// Row of the `commonallplayers` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerIndexRow {
    #[serde(rename = "PERSON_ID")]
    pub person_id: i64,

    #[serde(rename = "DISPLAY_FIRST_LAST")]
    pub display_first_last: String,

    #[serde(rename = "ROSTERSTATUS", default, deserialize_with = "lenient_i64")]
    pub roster_status: Option<i64>,

    #[serde(rename = "TEAM_ID", default, deserialize_with = "lenient_i64")]
    pub team_id: Option<i64>,

    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team_abbreviation: Option<String>,
}

/// Row of the `commonplayerinfo` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInfoRow {
    #[serde(rename = "PERSON_ID")]
    pub person_id: i64,

    #[serde(rename = "DISPLAY_FIRST_LAST")]
    pub display_first_last: String,

    #[serde(rename = "TEAM_ID", default, deserialize_with = "lenient_i64")]
    pub team_id: Option<i64>,

    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team_abbreviation: Option<String>,
}

/// Row of the `playergamelog` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GameLogRow {
    #[serde(rename = "Game_ID")]
    pub game_id: String,

    #[serde(rename = "GAME_DATE")]
    pub game_date: String,

    #[serde(rename = "MATCHUP", default)]
    pub matchup: String,

    #[serde(rename = "PTS", default)]
    pub pts: Option<f64>,
    #[serde(rename = "REB", default)]
    pub reb: Option<f64>,
    #[serde(rename = "AST", default)]
    pub ast: Option<f64>,
    #[serde(rename = "STL", default)]
    pub stl: Option<f64>,
    #[serde(rename = "BLK", default)]
    pub blk: Option<f64>,
    #[serde(rename = "TOV", default)]
    pub tov: Option<f64>,
    #[serde(rename = "FG3M", default)]
    pub fg3m: Option<f64>,
    #[serde(rename = "FGM", default)]
    pub fgm: Option<f64>,
    #[serde(rename = "FGA", default)]
    pub fga: Option<f64>,
    #[serde(rename = "FTM", default)]
    pub ftm: Option<f64>,
    #[serde(rename = "FTA", default)]
    pub fta: Option<f64>,
}

impl PlayerIndexRow {
    /// Team 0 means "no team" upstream
    pub fn into_identity(self) -> PlayerIdentity {
        PlayerIdentity {
            player_id: self.person_id,
            full_name: self.display_first_last,
            team_id: self.team_id.filter(|id| *id != 0),
            team_abbreviation: self.team_abbreviation.filter(|abbr| !abbr.is_empty()),
        }
    }

    pub fn is_rostered(&self) -> bool {
        self.roster_status == Some(1)
    }
}

impl PlayerInfoRow {
    pub fn into_identity(self) -> PlayerIdentity {
        PlayerIdentity {
            player_id: self.person_id,
            full_name: self.display_first_last,
            team_id: self.team_id.filter(|id| *id != 0),
            team_abbreviation: self.team_abbreviation.filter(|abbr| !abbr.is_empty()),
        }
    }
}

impl GameLogRow {
    /// Convert to a game record, leaving null columns out of the stat line
    pub fn into_game_record(self) -> GameRecord {
        let stats = [
            (StatCategory::Points, self.pts),
            (StatCategory::Rebounds, self.reb),
            (StatCategory::Assists, self.ast),
            (StatCategory::Steals, self.stl),
            (StatCategory::Blocks, self.blk),
            (StatCategory::Turnovers, self.tov),
            (StatCategory::ThreesMade, self.fg3m),
            (StatCategory::FieldGoalsMade, self.fgm),
            (StatCategory::FieldGoalsAttempted, self.fga),
            (StatCategory::FreeThrowsMade, self.ftm),
            (StatCategory::FreeThrowsAttempted, self.fta),
        ]
        .into_iter()
        .filter_map(|(category, value)| value.map(|v| (category, v)))
        .collect();

        GameRecord { game_id: self.game_id, game_date: self.game_date, matchup: self.matchup, stats }
    }
}

// ---------------------------------------------------------------------------
// CDN league schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueScheduleResponse {
    #[serde(rename = "leagueSchedule")]
    pub league_schedule: LeagueSchedule,
}

/// Full league schedule grouped by calendar date
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueSchedule {
    #[serde(rename = "seasonYear", default)]
    pub season_year: Option<String>,

    #[serde(rename = "gameDates", default)]
    pub game_dates: Vec<ScheduleGameDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleGameDate {
    /// e.g. "10/21/2025 00:00:00"
    #[serde(rename = "gameDate")]
    pub game_date: String,

    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledGame {
    #[serde(rename = "gameId", default)]
    pub game_id: String,

    #[serde(rename = "homeTeam")]
    pub home_team: ScheduleTeam,

    #[serde(rename = "awayTeam")]
    pub away_team: ScheduleTeam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleTeam {
    #[serde(rename = "teamId", default, deserialize_with = "lenient_i64")]
    pub team_id: Option<i64>,

    #[serde(rename = "teamTricode", default)]
    pub team_tricode: Option<String>,
}

impl ScheduleGameDate {
    /// Calendar date of this entry, `None` if the feed value is malformed
    pub fn date(&self) -> Option<NaiveDate> {
        chrono::NaiveDateTime::parse_from_str(&self.game_date, "%m/%d/%Y %H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(self.game_date.trim(), "%m/%d/%Y"))
            .ok()
    }
}

impl ScheduledGame {
    /// Team IDs taking part in this game
    pub fn team_ids(&self) -> impl Iterator<Item = i64> {
        self.home_team.team_id.into_iter().chain(self.away_team.team_id)
    }
}

/// Accepts a number, a numeric string, an empty string or null
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid integer: {n}"))),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => {
            s.trim().parse().map(Some).map_err(|_| de::Error::custom(format!("invalid integer: {s}")))
        }
        Some(other) => Err(de::Error::custom(format!("expected integer, got {other}"))),
    }
}
