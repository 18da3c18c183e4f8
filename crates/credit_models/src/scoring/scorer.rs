//! Logistic probability-of-default scorer.
//!
//! ```text
//! linear   = b0 + b1 * z(debt_to_equity) + b2 * z(ebit_margin)
//! raw_pd   = min(logistic(linear), pd_ceiling)
//! esg_pd   = min(logistic(linear + esg_weight * penalty), pd_ceiling)
//! ```
//!
//! Coefficients are fitted offline and injected through [`RiskConfig`]; the
//! scorer never re-estimates them.

use credit_core::math::logistic;
use credit_core::types::{ensure_finite, FeatureRecord, RiskError};
use infra_config::{ConfigError, LogisticCoefficients, RatioScaling, RiskConfig};
use serde::Serialize;
use tracing::trace;

use super::esg::EsgPenalty;

/// Baseline and ESG-adjusted PD for one company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PdEstimate {
    /// PD from financial ratios only
    pub raw_pd: f64,
    /// PD including the ESG penalty term
    pub esg_adjusted_pd: f64,
    /// ESG penalty in [0, 1] before weighting
    pub esg_penalty: f64,
}

/// Pure, deterministic PD scorer.
///
/// # Example
///
/// ```
/// use credit_core::types::FeatureRecord;
/// use credit_models::Scorer;
/// use infra_config::RiskConfig;
///
/// let scorer = Scorer::new(&RiskConfig::default()).unwrap();
/// let record = FeatureRecord::builder("SAP")
///     .debt_to_equity(0.5)
///     .ebit_margin(0.1)
///     .total_assets(1_000_000.0)
///     .esg_score(80.0)
///     .carbon_intensity(10.0)
///     .build()
///     .unwrap();
///
/// let pd = scorer.score(&record).unwrap();
/// assert!(pd.raw_pd > 0.0 && pd.raw_pd < 1.0);
/// assert!(pd.esg_adjusted_pd >= pd.raw_pd);
/// ```
#[derive(Debug, Clone)]
pub struct Scorer {
    coefficients: LogisticCoefficients,
    scaling: RatioScaling,
    esg: EsgPenalty,
    pd_ceiling: f64,
}

impl Scorer {
    /// Create a scorer from a configuration.
    ///
    /// # Errors
    /// Returns the configuration's validation error if it is incoherent.
    pub fn new(config: &RiskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            coefficients: config.coefficients,
            scaling: config.scaling,
            esg: EsgPenalty::new(config.esg, config.carbon_reference_max),
            pd_ceiling: config.pd_ceiling,
        })
    }

    /// Fitted coefficients in use.
    pub fn coefficients(&self) -> &LogisticCoefficients {
        &self.coefficients
    }

    /// Linear predictor from the financial ratios alone.
    ///
    /// # Errors
    /// Returns [`RiskError::InvalidInput`] for non-finite ratios, a negative
    /// debt-to-equity ratio, or ratios large enough to overflow the predictor.
    pub fn linear_predictor(&self, record: &FeatureRecord) -> Result<f64, RiskError> {
        let de = ensure_finite("debt_to_equity", record.debt_to_equity())?;
        let margin = ensure_finite("ebit_margin", record.ebit_margin())?;
        if de < 0.0 {
            return Err(RiskError::InvalidInput(format!(
                "{}: debt_to_equity must be non-negative, got {}",
                record.company(),
                de
            )));
        }

        let c = &self.coefficients;
        let linear = c.intercept
            + c.debt_to_equity * self.scaling.debt_to_equity.apply(de)
            + c.ebit_margin * self.scaling.ebit_margin.apply(margin);
        if !linear.is_finite() {
            return Err(RiskError::InvalidInput(format!(
                "{}: linear predictor overflows ({})",
                record.company(),
                linear
            )));
        }
        Ok(linear)
    }

    /// Score a record.
    ///
    /// # Errors
    /// - [`RiskError::InvalidInput`] for non-finite or negative inputs
    /// - [`RiskError::OutOfRange`] for an ESG score outside bounds under the reject policy
    pub fn score(&self, record: &FeatureRecord) -> Result<PdEstimate, RiskError> {
        let linear = self.linear_predictor(record)?;
        let esg_penalty = self
            .esg
            .penalty(record.esg_score(), record.carbon_intensity())?;
        let adjusted = linear + self.esg.weight() * esg_penalty;
        if !adjusted.is_finite() {
            return Err(RiskError::InvalidInput(format!(
                "{}: ESG-adjusted predictor overflows ({})",
                record.company(),
                adjusted
            )));
        }

        let raw_pd = self.cap(logistic(linear));
        let esg_adjusted_pd = self.cap(logistic(adjusted));

        trace!(
            company = %record.company(),
            linear,
            esg_penalty,
            raw_pd,
            esg_adjusted_pd,
            "Scored record"
        );

        Ok(PdEstimate {
            raw_pd,
            esg_adjusted_pd,
            esg_penalty,
        })
    }

    #[inline]
    fn cap(&self, pd: f64) -> f64 {
        pd.min(self.pd_ceiling)
    }
}
