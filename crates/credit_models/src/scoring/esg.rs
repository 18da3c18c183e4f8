//! ESG and carbon penalty term.
//!
//! Maps a weak ESG score and a high carbon intensity to a bounded, positive
//! penalty that is added to the logistic linear predictor:
//!
//! ```text
//! esg_gap     = (score_max - esg) / (score_max - score_min)        in [0, 1]
//! carbon_norm = min(carbon_intensity / carbon_reference_max, 1)     in [0, 1]
//! penalty     = (1 - carbon_share) * esg_gap + carbon_share * carbon_norm
//! ```

use credit_core::math::normalise_unit;
use credit_core::types::{ensure_finite, RiskError};
use infra_config::{EsgPenaltyConfig, OutOfRangePolicy};
use tracing::trace;

/// Evaluates the ESG penalty for one company.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsgPenalty {
    config: EsgPenaltyConfig,
    carbon_reference_max: f64,
}

impl EsgPenalty {
    /// Create a penalty evaluator.
    ///
    /// Both arguments are expected to come from a validated
    /// [`RiskConfig`](infra_config::RiskConfig).
    pub fn new(config: EsgPenaltyConfig, carbon_reference_max: f64) -> Self {
        Self {
            config,
            carbon_reference_max,
        }
    }

    /// Weight of the penalty in the linear predictor.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.config.weight
    }

    /// Returns the ESG score to use, applying the out-of-range policy.
    ///
    /// # Errors
    /// - [`RiskError::InvalidInput`] if the score is not finite
    /// - [`RiskError::OutOfRange`] if it lies outside the bounds under the reject policy
    pub fn admissible_score(&self, esg_score: f64) -> Result<f64, RiskError> {
        ensure_finite("esg_score", esg_score)?;
        let (min, max) = (self.config.score_min, self.config.score_max);
        if (min..=max).contains(&esg_score) {
            return Ok(esg_score);
        }
        match self.config.out_of_range {
            OutOfRangePolicy::Reject => Err(RiskError::OutOfRange {
                field: "esg_score",
                value: esg_score,
                min,
                max,
            }),
            OutOfRangePolicy::Clamp => {
                trace!(esg_score, min, max, "Clamping ESG score into range");
                Ok(esg_score.clamp(min, max))
            }
        }
    }

    /// Normalised carbon intensity in [0, 1].
    ///
    /// # Errors
    /// Returns [`RiskError::InvalidInput`] for negative or non-finite intensity.
    pub fn carbon_norm(&self, carbon_intensity: f64) -> Result<f64, RiskError> {
        let ci = ensure_finite("carbon_intensity", carbon_intensity)?;
        if ci < 0.0 {
            return Err(RiskError::InvalidInput(format!(
                "carbon_intensity must be non-negative, got {}",
                ci
            )));
        }
        Ok(normalise_unit(ci, self.carbon_reference_max))
    }

    /// Penalty in [0, 1]; higher means riskier.
    pub fn penalty(&self, esg_score: f64, carbon_intensity: f64) -> Result<f64, RiskError> {
        let score = self.admissible_score(esg_score)?;
        let carbon = self.carbon_norm(carbon_intensity)?;

        let range = self.config.score_max - self.config.score_min;
        let esg_gap = (self.config.score_max - score) / range;
        let share = self.config.carbon_share;

        Ok((1.0 - share) * esg_gap + share * carbon)
    }
}
