//! Interactive projection session
//!
//! One session loops over menu runs until the user quits. Each run picks a
//! mode and a week, reads one or two rosters, resolves every name against the
//! player index and prints the projection tables.

use chrono::NaiveDate;
use colored::*;
use nba_stats_fetcher::{PlayerIdentity, StatsProvider};
use player_registry::LookupError;
use projection_engine::{ProjectionEngine, WeekSelection};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::cli::display;
use crate::cli::prompt::{parse_roster, Prompter};
use crate::error::SessionError;

/// What a menu run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Averages and weekly totals for one roster
    RosterStats,
    /// Head-to-head projection of two rosters
    Compare,
}

impl SessionMode {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(SessionMode::RosterStats),
            "2" => Some(SessionMode::Compare),
            _ => None,
        }
    }
}

pub struct Session<P: StatsProvider, R, W> {
    engine: ProjectionEngine<P>,
    prompter: Prompter<R, W>,
    today: NaiveDate,
}

impl<P: StatsProvider, R: BufRead, W: Write> Session<P, R, W> {
    /// Week windows are computed relative to `today`
    pub fn new(engine: ProjectionEngine<P>, prompter: Prompter<R, W>, today: NaiveDate) -> Self {
        Self { engine, prompter, today }
    }

    pub fn engine(&self) -> &ProjectionEngine<P> {
        &self.engine
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run menu loops until the user quits or input ends
    ///
    /// Upstream failures abort only the current run. Only terminal I/O errors
    /// are returned.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        display::write_welcome(self.prompter.output())?;

        loop {
            match self.run_once().await {
                Ok(()) => {}
                Err(SessionError::Quit) => {
                    info!("Session ended by user");
                    writeln!(self.prompter.output(), "{}", "👋 Goodbye!".green())?;
                    return Ok(());
                }
                Err(SessionError::Engine(e)) => {
                    warn!("Run aborted: {}", e);
                    writeln!(self.prompter.output(), "{} {}", "❌".red(), e)?;
                    writeln!(self.prompter.output(), "Returning to the main menu.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn run_once(&mut self) -> Result<(), SessionError> {
        let mode = self.ask_mode()?;
        let week = self.ask_week()?;
        let window = week.window(self.today);
        info!("Running {:?} for the {} ({})", mode, week.label(), window);

        match mode {
            SessionMode::RosterStats => {
                let names = self.ask_roster("Enter your roster (comma-separated names): ")?;
                let players = self.resolve_roster(&names).await?;

                writeln!(self.prompter.output(), "⏳ Projecting {} players for {}...", players.len(), window)?;
                let report = self.engine.project_roster(&players, window).await?;
                display::write_roster_report(self.prompter.output(), "Your roster", &report)?;
            }
            SessionMode::Compare => {
                let team_a = self.ask_roster("Enter Team A (comma-separated names): ")?;
                let team_b = self.ask_roster("Enter Team B (comma-separated names): ")?;
                let team_a = self.resolve_roster(&team_a).await?;
                let team_b = self.resolve_roster(&team_b).await?;

                writeln!(self.prompter.output(), "⏳ Comparing rosters for {}...", window)?;
                let report = self.engine.compare_rosters(&team_a, &team_b, window).await?;
                display::write_comparison(self.prompter.output(), &report)?;
            }
        }

        Ok(())
    }

    fn ask_mode(&mut self) -> Result<SessionMode, SessionError> {
        display::write_menu(self.prompter.output())?;
        loop {
            let answer = self.prompter.ask("Select an option (1-2, q to quit): ")?;
            match SessionMode::from_choice(&answer) {
                Some(mode) => return Ok(mode),
                None => writeln!(self.prompter.output(), "❌ Invalid option '{answer}'. Enter 1 or 2.")?,
            }
        }
    }

    /// Anything other than "2" selects the current week
    fn ask_week(&mut self) -> Result<WeekSelection, SessionError> {
        display::write_week_menu(self.prompter.output(), self.today)?;
        let answer = self.prompter.ask("Select a week (1-2): ")?;
        Ok(WeekSelection::from_choice(&answer).unwrap_or(WeekSelection::Current))
    }

    fn ask_roster(&mut self, prompt: &str) -> Result<Vec<String>, SessionError> {
        loop {
            let names = parse_roster(&self.prompter.ask(prompt)?);
            if !names.is_empty() {
                return Ok(names);
            }
            writeln!(self.prompter.output(), "❌ Enter at least one player name.")?;
        }
    }

    async fn resolve_roster(&mut self, names: &[String]) -> Result<Vec<PlayerIdentity>, SessionError> {
        self.engine.ensure_loaded().await?;

        let mut players = Vec::with_capacity(names.len());
        for name in names {
            players.push(self.resolve_name(name)?);
        }
        Ok(players)
    }

    /// Resolve one typed name, re-prompting until it matches a single player
    fn resolve_name(&mut self, name: &str) -> Result<PlayerIdentity, SessionError> {
        let mut query = name.to_string();

        loop {
            writeln!(self.prompter.output(), "🔹 Looking up '{}'...", query)?;
            match self.engine.registry().resolve(&query).cloned() {
                Ok(player) => {
                    writeln!(self.prompter.output(), "   ✅ {}", player.full_name)?;
                    return Ok(player);
                }
                Err(LookupError::Ambiguous { query, candidates }) => {
                    return self.choose_candidate(&query, &candidates);
                }
                Err(e) => {
                    writeln!(self.prompter.output(), "   ❌ {}", e)?;
                    query = self.prompter.ask("Re-type the player's name: ")?;
                }
            }
        }
    }

    fn choose_candidate(
        &mut self,
        query: &str,
        candidates: &[PlayerIdentity],
    ) -> Result<PlayerIdentity, SessionError> {
        display::write_candidates(self.prompter.output(), query, candidates)?;

        let prompt = format!("Select a player (1-{}): ", candidates.len());
        loop {
            let answer = self.prompter.ask(&prompt)?;
            match answer.parse::<usize>() {
                Ok(choice) if (1..=candidates.len()).contains(&choice) => {
                    let player = candidates[choice - 1].clone();
                    writeln!(self.prompter.output(), "   ✅ {}", player.full_name)?;
                    return Ok(player);
                }
                _ => writeln!(
                    self.prompter.output(),
                    "❌ Enter a number between 1 and {}.",
                    candidates.len()
                )?,
            }
        }
    }
}
