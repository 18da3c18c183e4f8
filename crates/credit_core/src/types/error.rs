//! Error types for per-record credit risk computations.
//!
//! This module provides [`RiskError`], the taxonomy shared by the scorer,
//! scenario engine, capital calculator and pipeline. Every variant is
//! deterministic given the same input, so none of them is retried.

use thiserror::Error;

/// Categorised per-record risk errors.
///
/// # Variants
/// - `InvalidInput`: malformed, missing or non-finite numeric field, non-positive
///   assets, out-of-range LGD
/// - `UnknownScenario`: scenario name not present in the configured set
/// - `OutOfRange`: sensitivity or ESG score outside its configured bounds
///
/// # Examples
/// ```
/// use credit_core::types::RiskError;
///
/// let err = RiskError::UnknownScenario("Net Zero Now".to_string());
/// assert_eq!(format!("{}", err), "Unknown scenario: Net Zero Now");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Invalid or missing input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scenario name could not be resolved.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Bounded quantity outside its configured range.
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending quantity
        field: &'static str,
        /// Value supplied
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
}

impl RiskError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Short machine-friendly label of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UnknownScenario(_) => "unknown_scenario",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Checks that a named numeric field is finite.
///
/// # Errors
/// Returns [`RiskError::InvalidInput`] for NaN or infinite values.
pub fn ensure_finite(field: &str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RiskError::InvalidInput(format!(
            "{} must be finite, got {}",
            field, value
        )))
    }
}
