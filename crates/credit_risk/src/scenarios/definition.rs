//! Validated scenario definitions and the name lookup.

use std::collections::HashMap;

use credit_core::types::{ClimateScenario, RiskError};
use infra_config::{ConfigError, ScenarioSpec};

/// Named, immutable climate scenario.
///
/// # Examples
///
/// ```
/// use credit_core::types::ClimateScenario;
/// use credit_risk::scenarios::ScenarioDefinition;
///
/// let def = ScenarioDefinition::from(ClimateScenario::Disorderly);
/// assert_eq!(def.name(), "Disorderly");
/// assert_eq!(def.base_multiplier(), 1.8);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioDefinition {
    name: String,
    base_multiplier: f64,
    description: Option<String>,
}

impl ScenarioDefinition {
    /// Create a definition, validating the multiplier.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty name or a multiplier that is
    /// not finite or below 1.
    pub fn new(name: impl Into<String>, base_multiplier: f64) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::invalid("scenarios.name", "must not be empty"));
        }
        if !(base_multiplier.is_finite() && base_multiplier >= 1.0) {
            return Err(ConfigError::invalid(
                format!("scenarios.{}.base_multiplier", name),
                format!("must be finite and >= 1, got {}", base_multiplier),
            ));
        }
        Ok(Self {
            name,
            base_multiplier,
            description: None,
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Scenario name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Baseline carbon-cost escalation.
    #[inline]
    pub fn base_multiplier(&self) -> f64 {
        self.base_multiplier
    }

    /// Optional description.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl From<ClimateScenario> for ScenarioDefinition {
    fn from(preset: ClimateScenario) -> Self {
        Self {
            name: preset.name().to_string(),
            base_multiplier: preset.base_multiplier(),
            description: Some(preset.description().to_string()),
        }
    }
}

impl TryFrom<&ScenarioSpec> for ScenarioDefinition {
    type Error = ConfigError;

    fn try_from(spec: &ScenarioSpec) -> Result<Self, Self::Error> {
        let def = Self::new(spec.name.clone(), spec.base_multiplier)?;
        Ok(match &spec.description {
            Some(d) => def.with_description(d.clone()),
            None => def,
        })
    }
}

/// Non-empty set of scenarios with case-insensitive name lookup.
#[derive(Clone, Debug)]
pub struct ScenarioSet {
    definitions: Vec<ScenarioDefinition>,
    index: HashMap<String, usize>,
}

impl ScenarioSet {
    /// Build a set, rejecting an empty list or duplicate names.
    pub fn new(definitions: Vec<ScenarioDefinition>) -> Result<Self, ConfigError> {
        if definitions.is_empty() {
            return Err(ConfigError::EmptyScenarioSet);
        }
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(lookup_key(def.name()), i).is_some() {
                return Err(ConfigError::DuplicateScenario(def.name().to_string()));
            }
        }
        Ok(Self { definitions, index })
    }

    /// Build a set from configured specifications.
    pub fn from_specs(specs: &[ScenarioSpec]) -> Result<Self, ConfigError> {
        let definitions = specs
            .iter()
            .map(ScenarioDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definitions)
    }

    /// The three built-in presets.
    pub fn presets() -> Self {
        let definitions: Vec<_> = ClimateScenario::ALL
            .iter()
            .map(|p| ScenarioDefinition::from(*p))
            .collect();
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (lookup_key(d.name()), i))
            .collect();
        Self { definitions, index }
    }

    /// Resolve a name, ignoring case and surrounding whitespace.
    ///
    /// Long preset labels such as `Hot House World` resolve to the configured
    /// preset of the same name.
    ///
    /// # Errors
    /// Returns [`RiskError::UnknownScenario`] if the name is not configured.
    pub fn resolve(&self, name: &str) -> Result<&ScenarioDefinition, RiskError> {
        self.index
            .get(&lookup_key(name))
            .or_else(|| {
                name.parse::<ClimateScenario>()
                    .ok()
                    .and_then(|preset| self.index.get(&lookup_key(preset.name())))
            })
            .map(|&i| &self.definitions[i])
            .ok_or_else(|| RiskError::UnknownScenario(name.to_string()))
    }

    /// Definitions in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.definitions.iter()
    }

    /// Scenario names in configuration order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name()).collect()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
