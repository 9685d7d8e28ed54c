//! CLI command implementations for Jackal.

pub(crate) mod board;
pub(crate) mod play;

mod output;

use clap::ValueEnum;
use thiserror::Error;

/// Output format for the `board` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading commands or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A snapshot could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The game could not be set up.
    #[error(transparent)]
    Game(#[from] jackal::GameError),
}
