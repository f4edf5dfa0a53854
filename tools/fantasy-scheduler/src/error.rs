//! Error types for the interactive session

use projection_engine::EngineError;
use std::io;
use thiserror::Error;

/// Errors that end or interrupt a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// The user typed `q`/`quit` or input ended
    #[error("Session ended by user")]
    Quit,

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Upstream or lookup failure for the current run; the session continues
    #[error("{0}")]
    Engine(#[from] EngineError),
}
