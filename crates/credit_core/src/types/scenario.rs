//! Preset climate-transition pathways.

use std::fmt;
use std::str::FromStr;

use super::error::RiskError;

/// Built-in climate-transition scenarios.
///
/// The set is closed; additional pathways are supplied through configuration
/// and resolved by name at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimateScenario {
    /// Early, gradual policy action
    Orderly,
    /// Late, abrupt policy action
    Disorderly,
    /// Insufficient policy action, severe physical risk
    HotHouse,
}

impl ClimateScenario {
    /// All presets in ascending severity.
    pub const ALL: [ClimateScenario; 3] = [Self::Orderly, Self::Disorderly, Self::HotHouse];

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Orderly => "Orderly",
            Self::Disorderly => "Disorderly",
            Self::HotHouse => "Hot House",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Orderly => "Orderly transition: carbon costs rise 20% along a smooth policy path",
            Self::Disorderly => "Disorderly transition: delayed policy, carbon costs rise 80%",
            Self::HotHouse => "Hot house world: carbon costs rise 150% alongside physical damage",
        }
    }

    /// Baseline carbon-cost escalation under this pathway.
    pub fn base_multiplier(&self) -> f64 {
        match self {
            Self::Orderly => 1.2,
            Self::Disorderly => 1.8,
            Self::HotHouse => 2.5,
        }
    }
}

impl fmt::Display for ClimateScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClimateScenario {
    type Err = RiskError;

    /// Parses a preset name, ignoring case and surrounding whitespace.
    /// The long dashboard labels ("Orderly Transition", "Hot House World") are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "orderly" | "orderly transition" => Ok(Self::Orderly),
            "disorderly" | "disorderly transition" => Ok(Self::Disorderly),
            "hot house" | "hothouse" | "hot house world" => Ok(Self::HotHouse),
            _ => Err(RiskError::UnknownScenario(s.to_string())),
        }
    }
}
