//! # infra_config: Risk Model Configuration
//!
//! Holds every tunable constant of the climate-adjusted credit model in one
//! explicit, validated structure that is injected into the scorer, the
//! scenario engine and the pipeline at construction time.
//!
//! - `risk`: configuration schema ([`RiskConfig`] and its sections)
//! - `loader`: layered loading (TOML file + `CLIMATE_RISK_*` environment)
//! - `error`: [`ConfigError`]

#![deny(missing_docs)]

pub mod error;
pub mod loader;
pub mod risk;

pub use error::ConfigError;
pub use loader::{load_config, load_file, ENV_PREFIX};
pub use risk::{
    EsgPenaltyConfig, LogisticCoefficients, OutOfRangePolicy, ParallelSettings, RatioScaling,
    RiskConfig, ScenarioSpec, SensitivityBounds, Standardisation,
};
