//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating a [`RiskConfig`](crate::RiskConfig).
///
/// Any of these is fatal: an incoherent configuration invalidates every
/// computation that would follow, so it is reported at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered source could not be read or merged.
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// Configuration file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// TOML text could not be parsed into the schema.
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML.
    #[error("Failed to serialise TOML: {0}")]
    Serialise(#[from] toml::ser::Error),

    /// No scenarios configured.
    #[error("Scenario set is empty")]
    EmptyScenarioSet,

    /// Two scenarios share a name (compared case-insensitively).
    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    /// A field violates its documented constraint.
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// Human-readable constraint
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid field error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
