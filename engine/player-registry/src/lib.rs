//! Player Registry - Resolves typed player names to NBA player identities
//!
//! The registry is built once per session from the upstream player index and
//! answers exact and partial (substring) name lookups.

pub mod registry;
pub mod types;

pub use registry::PlayerRegistry;
pub use types::LookupError;
