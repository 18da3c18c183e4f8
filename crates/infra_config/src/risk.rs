//! Risk model configuration schema.
//!
//! Every tunable constant of the scoring model, the scenario engine and the
//! capital calculation lives here so that the same core can be
//! re-parameterised without a code change. All sections carry built-in
//! defaults; a TOML file only needs to mention what it overrides.
//!
//! Scalar fields are declared before tables so the struct serialises to valid
//! TOML as-is.

use std::collections::HashSet;

use credit_core::types::ClimateScenario;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete configuration of the risk pipeline.
///
/// # Example
///
/// ```
/// use infra_config::RiskConfig;
///
/// let config = RiskConfig::from_toml_str(
///     r#"
///     pd_ceiling = 0.99
///
///     [coefficients]
///     intercept = -2.5
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.pd_ceiling, 0.99);
/// assert_eq!(config.coefficients.intercept, -2.5);
/// assert_eq!(config.scenarios.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Reference carbon intensity mapped to 1.0 by the normalisation
    pub carbon_reference_max: f64,
    /// Upper cap on every PD, strictly below 1
    pub pd_ceiling: f64,
    /// Loss-given-default applied when a record carries no override
    pub default_lgd: f64,
    /// Scenario PD above which a firm is flagged high risk
    pub high_risk_threshold: f64,
    /// Carbon intensity above which a firm counts as a high emitter
    pub high_emitter_threshold: f64,
    /// Fitted logistic coefficients
    pub coefficients: LogisticCoefficients,
    /// Standardisation applied to each ratio before scoring
    pub scaling: RatioScaling,
    /// ESG penalty shape
    pub esg: EsgPenaltyConfig,
    /// Allowed sensitivity range
    pub sensitivity_bounds: SensitivityBounds,
    /// Batch parallelisation settings
    pub parallel: ParallelSettings,
    /// Configured climate scenarios
    pub scenarios: Vec<ScenarioSpec>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            carbon_reference_max: 1_000.0,
            pd_ceiling: 0.999,
            default_lgd: 0.45,
            high_risk_threshold: 0.25,
            high_emitter_threshold: 500.0,
            coefficients: LogisticCoefficients::default(),
            scaling: RatioScaling::default(),
            esg: EsgPenaltyConfig::default(),
            sensitivity_bounds: SensitivityBounds::default(),
            parallel: ParallelSettings::default(),
            scenarios: ClimateScenario::ALL.iter().map(ScenarioSpec::from).collect(),
        }
    }
}

impl RiskConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RiskConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    ///
    /// Checks every coefficient for finiteness and every bounded constant
    /// against its documented range. The scenario set must be non-empty with
    /// unique names and multipliers of at least 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coefficients.validate()?;
        self.scaling.validate()?;
        self.esg.validate()?;
        self.sensitivity_bounds.validate()?;
        self.parallel.validate()?;

        positive("carbon_reference_max", self.carbon_reference_max)?;
        if !(self.pd_ceiling > 0.0 && self.pd_ceiling < 1.0) {
            return Err(ConfigError::invalid(
                "pd_ceiling",
                format!("must be in (0, 1), got {}", self.pd_ceiling),
            ));
        }
        if !(self.default_lgd > 0.0 && self.default_lgd <= 1.0) {
            return Err(ConfigError::invalid(
                "default_lgd",
                format!("must be in (0, 1], got {}", self.default_lgd),
            ));
        }
        if !(self.high_risk_threshold > 0.0 && self.high_risk_threshold < 1.0) {
            return Err(ConfigError::invalid(
                "high_risk_threshold",
                format!("must be in (0, 1), got {}", self.high_risk_threshold),
            ));
        }
        non_negative("high_emitter_threshold", self.high_emitter_threshold)?;

        if self.scenarios.is_empty() {
            return Err(ConfigError::EmptyScenarioSet);
        }
        let mut seen = HashSet::new();
        for spec in &self.scenarios {
            spec.validate()?;
            if !seen.insert(spec.name.trim().to_lowercase()) {
                return Err(ConfigError::DuplicateScenario(spec.name.clone()));
            }
        }

        Ok(())
    }
}

/// Fitted coefficients of the logistic PD model.
///
/// ```text
/// linear = intercept + debt_to_equity * z(D/E) + ebit_margin * z(EBIT margin)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticCoefficients {
    /// Intercept (b0)
    pub intercept: f64,
    /// Weight on debt-to-equity (b1)
    pub debt_to_equity: f64,
    /// Weight on EBIT margin (b2)
    pub ebit_margin: f64,
}

impl Default for LogisticCoefficients {
    fn default() -> Self {
        Self {
            intercept: -3.0,
            debt_to_equity: 0.8,
            ebit_margin: -2.5,
        }
    }
}

impl LogisticCoefficients {
    fn validate(&self) -> Result<(), ConfigError> {
        finite("coefficients.intercept", self.intercept)?;
        finite("coefficients.debt_to_equity", self.debt_to_equity)?;
        finite("coefficients.ebit_margin", self.ebit_margin)?;
        Ok(())
    }
}

/// Mean/standard-deviation standardisation of one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Standardisation {
    /// Population mean subtracted from the raw ratio
    pub mean: f64,
    /// Standard deviation dividing the centred ratio
    pub std_dev: f64,
}

impl Default for Standardisation {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl Standardisation {
    /// Standardise a raw value.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        finite(&format!("{}.mean", field), self.mean)?;
        positive(&format!("{}.std_dev", field), self.std_dev)
    }
}

/// Per-ratio standardisation. Identity by default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioScaling {
    /// Debt-to-equity standardisation
    pub debt_to_equity: Standardisation,
    /// EBIT margin standardisation
    pub ebit_margin: Standardisation,
}

impl RatioScaling {
    fn validate(&self) -> Result<(), ConfigError> {
        self.debt_to_equity.validate("scaling.debt_to_equity")?;
        self.ebit_margin.validate("scaling.ebit_margin")
    }
}

/// Handling of ESG scores outside `[score_min, score_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Fail the record with an out-of-range error
    #[default]
    Reject,
    /// Clamp the score into range and continue
    Clamp,
}

/// Shape of the ESG penalty added to the linear predictor.
///
/// ```text
/// esg_gap     = (score_max - esg) / (score_max - score_min)
/// carbon_norm = min(carbon_intensity / carbon_reference_max, 1)
/// penalty     = (1 - carbon_share) * esg_gap + carbon_share * carbon_norm
/// linear     += weight * penalty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsgPenaltyConfig {
    /// Weight of the penalty in the linear predictor, non-negative
    pub weight: f64,
    /// Share of the penalty driven by carbon intensity, in [0, 1]
    pub carbon_share: f64,
    /// Lowest admissible ESG score
    pub score_min: f64,
    /// Highest admissible ESG score
    pub score_max: f64,
    /// Out-of-range handling
    pub out_of_range: OutOfRangePolicy,
}

impl Default for EsgPenaltyConfig {
    fn default() -> Self {
        Self {
            weight: 0.5,
            carbon_share: 0.5,
            score_min: 0.0,
            score_max: 100.0,
            out_of_range: OutOfRangePolicy::Reject,
        }
    }
}

impl EsgPenaltyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("esg.weight", self.weight)?;
        if !(0.0..=1.0).contains(&self.carbon_share) {
            return Err(ConfigError::invalid(
                "esg.carbon_share",
                format!("must be in [0, 1], got {}", self.carbon_share),
            ));
        }
        finite("esg.score_min", self.score_min)?;
        finite("esg.score_max", self.score_max)?;
        if self.score_min >= self.score_max {
            return Err(ConfigError::invalid(
                "esg.score_min",
                format!(
                    "must be below score_max ({} >= {})",
                    self.score_min, self.score_max
                ),
            ));
        }
        Ok(())
    }
}

/// Inclusive range of admissible sensitivity factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityBounds {
    /// Lower bound, non-negative
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Default for SensitivityBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 2.0 }
    }
}

impl SensitivityBounds {
    /// Returns whether `value` is finite and inside the bounds.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("sensitivity_bounds.min", self.min)?;
        finite("sensitivity_bounds.max", self.max)?;
        if self.min > self.max {
            return Err(ConfigError::invalid(
                "sensitivity_bounds",
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Batch parallelisation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelSettings {
    /// Records per rayon work item
    pub batch_size: usize,
    /// Minimum batch length before going parallel
    pub parallel_threshold: usize,
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            batch_size: 64,
            parallel_threshold: 100,
        }
    }
}

impl ParallelSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::invalid("parallel.batch_size", "must be > 0"));
        }
        Ok(())
    }
}

/// One configured climate scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Scenario name, unique within the set
    pub name: String,
    /// Baseline carbon-cost escalation, at least 1
    pub base_multiplier: f64,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScenarioSpec {
    /// Create a scenario specification.
    pub fn new(name: impl Into<String>, base_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            base_multiplier,
            description: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("scenarios.name", "must not be empty"));
        }
        if !(self.base_multiplier.is_finite() && self.base_multiplier >= 1.0) {
            return Err(ConfigError::invalid(
                format!("scenarios.{}.base_multiplier", self.name),
                format!("must be finite and >= 1, got {}", self.base_multiplier),
            ));
        }
        Ok(())
    }
}

impl From<&ClimateScenario> for ScenarioSpec {
    fn from(preset: &ClimateScenario) -> Self {
        Self {
            name: preset.name().to_string(),
            base_multiplier: preset.base_multiplier(),
            description: Some(preset.description().to_string()),
        }
    }
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite, got {}", value),
        ))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive, got {}", value),
        ))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be non-negative, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RiskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenarios.len(), 3);
        assert_eq!(config.scenarios[0].name, "Orderly");
        assert_eq!(config.scenarios[0].base_multiplier, 1.2);
    }

    #[test]
    fn test_empty_scenarios_rejected() {
        let mut config = RiskConfig::default();
        config.scenarios.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyScenarioSet)
        ));
    }

    #[test]
    fn test_duplicate_scenarios_rejected() {
        let mut config = RiskConfig::default();
        config.scenarios.push(ScenarioSpec::new("orderly ", 1.4));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateScenario(_))
        ));
    }

    #[test]
    fn test_multiplier_below_one_rejected() {
        let mut config = RiskConfig::default();
        config.scenarios.push(ScenarioSpec::new("Green Boom", 0.9));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_multiplier"));
    }

    #[test]
    fn test_pd_ceiling_must_be_below_one() {
        let mut config = RiskConfig::default();
        config.pd_ceiling = 1.0;
        assert!(config.validate().is_err());
        config.pd_ceiling = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let mut config = RiskConfig::default();
        config.coefficients.ebit_margin = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coefficients.ebit_margin"));
    }

    #[test]
    fn test_lgd_range() {
        let mut config = RiskConfig::default();
        config.default_lgd = 1.0;
        assert!(config.validate().is_ok());
        config.default_lgd = 0.0;
        assert!(config.validate().is_err());
        config.default_lgd = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_sensitivity_bounds_rejected() {
        let mut config = RiskConfig::default();
        config.sensitivity_bounds = SensitivityBounds { min: 2.0, max: 1.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sensitivity_bounds_contains() {
        let bounds = SensitivityBounds::default();
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(2.0));
        assert!(!bounds.contains(2.01));
        assert!(!bounds.contains(-0.1));
        assert!(!bounds.contains(f64::NAN));
    }

    #[test]
    fn test_esg_bounds_rejected_when_inverted() {
        let mut config = RiskConfig::default();
        config.esg.score_min = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_esg_weight_rejected() {
        let mut config = RiskConfig::default();
        config.esg.weight = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_std_dev_rejected() {
        let mut config = RiskConfig::default();
        config.scaling.ebit_margin.std_dev = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scaling.ebit_margin.std_dev"));
    }

    #[test]
    fn test_standardisation_apply() {
        let s = Standardisation {
            mean: 1.0,
            std_dev: 2.0,
        };
        assert_eq!(s.apply(5.0), 2.0);
        assert_eq!(Standardisation::default().apply(0.7), 0.7);
    }

    #[test]
    fn test_toml_partial_override() {
        let config = RiskConfig::from_toml_str(
            r#"
            default_lgd = 0.6

            [esg]
            out_of_range = "clamp"

            [[scenarios]]
            name = "Net Zero 2050"
            base_multiplier = 1.1
            "#,
        )
        .unwrap();
        assert_eq!(config.default_lgd, 0.6);
        assert_eq!(config.esg.out_of_range, OutOfRangePolicy::Clamp);
        assert_eq!(config.esg.weight, 0.5);
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.scenarios[0].description, None);
    }

    #[test]
    fn test_toml_invalid_rejected() {
        let result = RiskConfig::from_toml_str("pd_ceiling = 1.5");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RiskConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = RiskConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
