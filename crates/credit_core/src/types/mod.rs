//! Core record, identifier and error types.
//!
//! This module provides:
//! - `ids`: Strongly-typed company identifier
//! - `record`: Feature snapshots and their boundary form
//! - `scenario`: Preset climate-transition pathways
//! - `error`: The per-record error taxonomy
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`CompanyId`] from `ids`
//! - [`FeatureRecord`], [`FeatureRecordBuilder`], [`RawFeatureRecord`] from `record`
//! - [`ClimateScenario`] from `scenario`
//! - [`RiskError`] from `error`

pub mod error;
pub mod ids;
pub mod record;
pub mod scenario;

pub use error::{ensure_finite, RiskError};
pub use ids::CompanyId;
pub use record::{FeatureRecord, FeatureRecordBuilder, RawFeatureRecord};
pub use scenario::ClimateScenario;
