//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `sensitivity` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument has an unsupported value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The study file is malformed.
    #[error("Invalid study: {0}")]
    Study(String),

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sensitivity computation failed.
    #[error(transparent)]
    Sensitivity(#[from] sensitivity_core::SensitivityError),

    /// Expression parsing failed.
    #[error("Expression error: {0}")]
    Parse(#[from] sensitivity_core::ParseError),

    /// Grid sampling or export failed.
    #[error(transparent)]
    Grid(#[from] sensitivity_grid::GridError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
