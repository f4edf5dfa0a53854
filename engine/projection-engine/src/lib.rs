//! Projection Engine
//!
//! Turns season game logs into per-game averages, scales them by the number
//! of games a player's team plays in a calendar week, and aggregates and
//! compares rosters. Shooting percentages are always derived from summed
//! makes and attempts, never averaged.

pub mod calculator;
pub mod comparison;
pub mod engine;
pub mod error;
pub mod models;
pub mod schedule;

pub use calculator::{RosterAggregator, SeasonAverager, WeeklyProjector};
pub use comparison::{
    CategoryComparison, ComparisonSide, FantasyCategory, RosterComparator, RosterComparison,
};
pub use engine::ProjectionEngine;
pub use error::{EngineError, Result};
pub use models::*;
pub use schedule::{WeekSelection, WeekWindow, WeeklySchedule};
