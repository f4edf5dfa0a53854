//! Fantasy Scheduler
//!
//! Interactive weekly projections for NBA fantasy rosters: season averages
//! from the stats API, scaled by each team's games in the chosen calendar
//! week, with roster totals and a nine-category head-to-head comparison.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Prompter, Session, SessionMode};
pub use config::{AppConfig, LoggingConfig};
pub use error::SessionError;
pub use logging::initialize_logging;
