//! # credit_core: Foundation for Climate-Adjusted Credit Scoring
//!
//! ## Layer 1 (Foundation) Role
//!
//! credit_core is the bottom layer of the workspace, providing:
//! - Company identifiers: `CompanyId` (`types::ids`)
//! - Per-company feature snapshots: `FeatureRecord`, `RawFeatureRecord` (`types::record`)
//! - Preset climate pathways: `ClimateScenario` (`types::scenario`)
//! - Error taxonomy: `RiskError` (`types::error`)
//! - Logistic transform and helpers (`math::logistic`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Boundary (de)serialisation of records
//!
//! ## Usage Examples
//!
//! ```rust
//! use credit_core::math::logistic::logistic;
//! use credit_core::types::FeatureRecord;
//!
//! let record = FeatureRecord::builder("SAP")
//!     .debt_to_equity(0.5)
//!     .ebit_margin(0.1)
//!     .total_assets(1_000_000.0)
//!     .esg_score(80.0)
//!     .carbon_intensity(10.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(record.company().as_str(), "SAP");
//!
//! let pd = logistic(-2.85_f64);
//! assert!(pd > 0.0 && pd < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
