//! CLI error types.

use credit_core::types::RiskError;
use infra_config::ConfigError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination is not supported.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input data failed quality checks.
    #[error("Data quality check failed: {0}")]
    InvalidData(String),

    /// Risk configuration is incoherent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Run-level risk error (unknown scenario, sensitivity out of range).
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
