//! Climate scenario engine.
//!
//! Rescales an ESG-adjusted PD under a named climate pathway:
//!
//! ```text
//! carbon_norm = min(carbon_intensity / carbon_reference_max, 1)
//! effective   = 1 + (base_multiplier - 1) * sensitivity * carbon_norm
//! scenario_pd = min(esg_pd * effective, pd_ceiling)
//! ```
//!
//! `effective >= 1` always, so a scenario can only raise risk. It is
//! non-decreasing in both sensitivity and carbon intensity and equals 1 when
//! either is zero.

use credit_core::math::normalise_unit;
use credit_core::types::{ensure_finite, RiskError};
use infra_config::{ConfigError, RiskConfig, SensitivityBounds};
use serde::Serialize;
use tracing::trace;

use super::definition::{ScenarioDefinition, ScenarioSet};

/// Result of applying a scenario to one PD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioAdjustment {
    /// Multiplier applied to the ESG-adjusted PD
    pub effective_multiplier: f64,
    /// Stressed PD, capped at the ceiling
    pub scenario_adjusted_pd: f64,
}

/// Scenario engine holding the configured pathways.
///
/// # Example
///
/// ```
/// use credit_risk::scenarios::ScenarioEngine;
/// use infra_config::RiskConfig;
///
/// let engine = ScenarioEngine::new(&RiskConfig::default()).unwrap();
/// let pd = engine.apply("Hot House", 1.0, 0.1, 1_000.0).unwrap();
/// assert!((pd - 0.25).abs() < 1e-12);
/// assert_eq!(engine.apply("Hot House", 0.0, 0.1, 1_000.0).unwrap(), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    scenarios: ScenarioSet,
    carbon_reference_max: f64,
    pd_ceiling: f64,
    sensitivity_bounds: SensitivityBounds,
}

impl ScenarioEngine {
    /// Create an engine from a configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration or its scenario list is
    /// invalid.
    pub fn new(config: &RiskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scenarios: ScenarioSet::from_specs(&config.scenarios)?,
            carbon_reference_max: config.carbon_reference_max,
            pd_ceiling: config.pd_ceiling,
            sensitivity_bounds: config.sensitivity_bounds,
        })
    }

    /// Configured scenarios.
    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    /// Accepted sensitivity range.
    pub fn sensitivity_bounds(&self) -> SensitivityBounds {
        self.sensitivity_bounds
    }

    /// Resolve a scenario by name.
    pub fn resolve(&self, name: &str) -> Result<&ScenarioDefinition, RiskError> {
        self.scenarios.resolve(name)
    }

    /// Check a sensitivity against the configured bounds.
    ///
    /// # Errors
    /// Returns [`RiskError::OutOfRange`] for values outside the bounds or NaN.
    pub fn check_sensitivity(&self, sensitivity: f64) -> Result<f64, RiskError> {
        if self.sensitivity_bounds.contains(sensitivity) {
            Ok(sensitivity)
        } else {
            Err(RiskError::OutOfRange {
                field: "sensitivity",
                value: sensitivity,
                min: self.sensitivity_bounds.min,
                max: self.sensitivity_bounds.max,
            })
        }
    }

    /// Effective multiplier for a scenario at the given sensitivity and
    /// carbon intensity.
    pub fn effective_multiplier(
        &self,
        scenario: &ScenarioDefinition,
        sensitivity: f64,
        carbon_intensity: f64,
    ) -> Result<f64, RiskError> {
        let sensitivity = self.check_sensitivity(sensitivity)?;
        let ci = ensure_finite("carbon_intensity", carbon_intensity)?;
        if ci < 0.0 {
            return Err(RiskError::InvalidInput(format!(
                "carbon_intensity must be non-negative, got {}",
                ci
            )));
        }
        let carbon_norm = normalise_unit(ci, self.carbon_reference_max);
        Ok(1.0 + (scenario.base_multiplier() - 1.0) * sensitivity * carbon_norm)
    }

    /// Apply a resolved scenario to an ESG-adjusted PD.
    ///
    /// # Errors
    /// - [`RiskError::OutOfRange`] for a sensitivity outside bounds
    /// - [`RiskError::InvalidInput`] for a PD outside [0, pd_ceiling] or a
    ///   negative or non-finite carbon intensity
    pub fn adjust(
        &self,
        scenario: &ScenarioDefinition,
        sensitivity: f64,
        esg_adjusted_pd: f64,
        carbon_intensity: f64,
    ) -> Result<ScenarioAdjustment, RiskError> {
        if !(0.0..=self.pd_ceiling).contains(&esg_adjusted_pd) {
            return Err(RiskError::InvalidInput(format!(
                "esg_adjusted_pd must be in [0, {}], got {}",
                self.pd_ceiling, esg_adjusted_pd
            )));
        }
        let effective_multiplier =
            self.effective_multiplier(scenario, sensitivity, carbon_intensity)?;
        let scenario_adjusted_pd = (esg_adjusted_pd * effective_multiplier).min(self.pd_ceiling);

        trace!(
            scenario = scenario.name(),
            sensitivity,
            effective_multiplier,
            scenario_adjusted_pd,
            "Applied scenario"
        );

        Ok(ScenarioAdjustment {
            effective_multiplier,
            scenario_adjusted_pd,
        })
    }

    /// Scenario-adjusted PD for a scenario looked up by name.
    pub fn apply(
        &self,
        scenario: &str,
        sensitivity: f64,
        esg_adjusted_pd: f64,
        carbon_intensity: f64,
    ) -> Result<f64, RiskError> {
        let def = self.resolve(scenario)?;
        self.adjust(def, sensitivity, esg_adjusted_pd, carbon_intensity)
            .map(|a| a.scenario_adjusted_pd)
    }
}
