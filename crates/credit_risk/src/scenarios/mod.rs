//! Climate scenario definitions and the scenario engine.
//!
//! - [`ScenarioDefinition`] / [`ScenarioSet`]: validated, named pathways
//! - [`ScenarioEngine`]: stresses ESG-adjusted PDs by carbon exposure

mod definition;
mod engine;

pub use definition::{ScenarioDefinition, ScenarioSet};
pub use engine::{ScenarioAdjustment, ScenarioEngine};
