//! Terminal tables for projections and comparisons

use chrono::NaiveDate;
use colored::*;
use nba_stats_fetcher::{PlayerIdentity, StatCategory, StatLine};
use projection_engine::{ComparisonReport, ComparisonSide, RosterReport, WeekSelection};
use std::io::{self, Write};

/// Counting stats shown in every table, makes and attempts included
const COLUMNS: [StatCategory; 11] = StatCategory::ALL;

const NAME_WIDTH: usize = 26;
const VALUE_WIDTH: usize = 8;

/// Counting stat with two decimals
pub fn format_count(value: f64) -> String {
    format!("{value:.2}")
}

/// Percentage with one decimal, `N/A` when there were no attempts
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:.1}%"),
        None => "N/A".to_string(),
    }
}

fn player_label(player: &PlayerIdentity) -> String {
    match &player.team_abbreviation {
        Some(team) => format!("{} ({})", player.full_name, team),
        None => player.full_name.clone(),
    }
}

fn header(first: &str, extra: &str) -> String {
    let mut line = format!("{first:<NAME_WIDTH$}{extra}");
    for category in COLUMNS {
        line.push_str(&format!("{:>VALUE_WIDTH$}", category.label()));
    }
    line.push_str(&format!("{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}", "FG%", "FT%"));
    line
}

fn stat_row(stats: &StatLine) -> String {
    let mut line = String::new();
    for category in COLUMNS {
        line.push_str(&format!("{:>VALUE_WIDTH$}", format_count(stats.get(category))));
    }
    line.push_str(&format!(
        "{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}",
        format_pct(stats.field_goals().percentage()),
        format_pct(stats.free_throws().percentage())
    ));
    line
}

fn truncate(name: &str) -> String {
    if name.chars().count() < NAME_WIDTH {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(NAME_WIDTH - 2).collect();
        short.push('~');
        short
    }
}

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(NAME_WIDTH + 6 + VALUE_WIDTH * (COLUMNS.len() + 2)).dimmed())
}

pub fn write_welcome<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "╔══════════════════════════════════════════════════════════════╗".cyan())?;
    writeln!(out, "{}", "║                 🏀 NBA FANTASY WEEK SCHEDULER                ║".cyan())?;
    writeln!(out, "{}", "╚══════════════════════════════════════════════════════════════╝".cyan())?;
    writeln!(out, "{}", "Type 'q' or 'quit' at any prompt to exit.".yellow())?;
    Ok(())
}

pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "MAIN MENU".blue().bold())?;
    writeln!(out, "  1. 📊 Roster stats     - Project one roster for a week")?;
    writeln!(out, "  2. ⚔️  Compare rosters  - Head-to-head projection of two rosters")?;
    Ok(())
}

pub fn write_week_menu<W: Write>(out: &mut W, today: NaiveDate) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "WHICH WEEK?".blue().bold())?;
    for (choice, week) in [("1", WeekSelection::Current), ("2", WeekSelection::Next)] {
        writeln!(out, "  {}. {:<13} ({})", choice, week.label(), week.window(today))?;
    }
    Ok(())
}

pub fn write_candidates<W: Write>(
    out: &mut W,
    query: &str,
    candidates: &[PlayerIdentity],
) -> io::Result<()> {
    writeln!(out, "🔎 {} players match '{}':", candidates.len(), query)?;
    for (index, candidate) in candidates.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, player_label(candidate))?;
    }
    Ok(())
}

/// Season averages, weekly projections and roster totals for one roster
pub fn write_roster_report<W: Write>(out: &mut W, title: &str, report: &RosterReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", title.green().bold(), format!("({})", report.window).dimmed())?;

    writeln!(out)?;
    writeln!(out, "{}", "Season averages (per game)".bold())?;
    writeln!(out, "{}", header("Player", "    GP"))?;
    rule(out)?;
    for player in &report.players {
        let name = truncate(&player_label(&player.player));
        match &player.averages {
            Some(averages) => writeln!(
                out,
                "{:<NAME_WIDTH$}{:>6}{}",
                name,
                averages.games_played,
                stat_row(&averages.per_game)
            )?,
            None => writeln!(out, "{:<NAME_WIDTH$}{:>6}  {}", name, 0, "no games logged this season".yellow())?,
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", format!("Projected totals for {}", report.window).bold())?;
    writeln!(out, "{}", header("Player", " Games"))?;
    rule(out)?;
    for player in &report.players {
        writeln!(
            out,
            "{:<NAME_WIDTH$}{:>6}{}",
            truncate(&player_label(&player.player)),
            player.games_in_week(),
            stat_row(&player.projection.totals)
        )?;
    }
    rule(out)?;
    writeln!(
        out,
        "{}{:>6}{}",
        format!("{:<NAME_WIDTH$}", "ROSTER TOTAL").bold(),
        "",
        stat_row(&report.totals.totals)
    )?;

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Left out of the totals (data unavailable):".red())?;
        for failure in &report.failures {
            writeln!(out, "  ❌ {}: {}", failure.player.full_name, failure.message)?;
        }
    }

    Ok(())
}

/// Both rosters, then the category-by-category comparison
pub fn write_comparison<W: Write>(out: &mut W, report: &ComparisonReport) -> io::Result<()> {
    write_roster_report(out, "Team A", &report.team_a)?;
    write_roster_report(out, "Team B", &report.team_b)?;

    writeln!(out)?;
    writeln!(out, "{}", "HEAD-TO-HEAD".blue().bold())?;
    writeln!(out, "{:<10}{:>12}{:>12}   {}", "Category", "Team A", "Team B", "Leader")?;
    writeln!(out, "{}", "─".repeat(46).dimmed())?;

    for row in &report.comparison.rows {
        let (a, b) = if row.category.is_percentage() {
            (format_pct(row.team_a), format_pct(row.team_b))
        } else {
            (
                row.team_a.map(format_count).unwrap_or_else(|| "N/A".to_string()),
                row.team_b.map(format_count).unwrap_or_else(|| "N/A".to_string()),
            )
        };
        let leader = match row.leader {
            Some(leader) => side(leader),
            None => "-".dimmed(),
        };
        writeln!(out, "{:<10}{:>12}{:>12}   {}", row.category.label(), a, b, leader)?;
    }

    let comparison = &report.comparison;
    writeln!(out)?;
    writeln!(
        out,
        "Counting categories: Team A {} - Team B {} ({} tied)",
        comparison.team_a_categories, comparison.team_b_categories, comparison.ties
    )?;
    writeln!(out, "Projected leader: {}", side(comparison.leader()))?;
    Ok(())
}

fn side(leader: ComparisonSide) -> ColoredString {
    match leader {
        ComparisonSide::TeamA => leader.to_string().green(),
        ComparisonSide::TeamB => leader.to_string().cyan(),
        ComparisonSide::Tie => leader.to_string().normal(),
    }
}
