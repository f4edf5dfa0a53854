//! NBA Stats Fetcher
//!
//! This crate fetches player identities, season game logs and the league
//! schedule from the public NBA stats and CDN endpoints. Everything downstream
//! talks to it through the [`StatsProvider`] trait.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod provider;

pub use config::FetcherConfig;
pub use error::{FetchError, Result};
pub use fetcher::NbaStatsFetcher;
pub use models::*;
pub use provider::StatsProvider;
