//! Error types for the command-line runner.

use std::path::PathBuf;

use tapeworks_core::MachineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a machine config.
    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The machine stopped with an error.
    #[error("machine error: {0}")]
    Machine(#[from] MachineError),

    /// Output could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
