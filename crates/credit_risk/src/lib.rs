//! # credit_risk: Scenarios and Batch Pipeline (L4: Application)
//!
//! Combines the L2 models into the climate-adjusted risk workflow.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            credit_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - presets, ScenarioEngine │
//! │  pipeline/   - RiskPipeline, outcomes  │
//! │  parallel/   - Rayon utilities         │
//! │  summary     - portfolio aggregates    │
//! │  quality     - input data checks       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           credit_models (L2)            │
//! │  Scorer, CapitalCalculator              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use credit_core::types::FeatureRecord;
//! use credit_risk::{summary::PortfolioSummary, RiskPipeline};
//! use infra_config::RiskConfig;
//!
//! let pipeline = RiskPipeline::new(&RiskConfig::default()).unwrap();
//! let records = vec![
//!     FeatureRecord::builder("SAP")
//!         .debt_to_equity(0.5)
//!         .ebit_margin(0.1)
//!         .total_assets(1_000_000.0)
//!         .esg_score(80.0)
//!         .carbon_intensity(10.0)
//!         .build()
//!         .unwrap(),
//!     FeatureRecord::builder("RWE")
//!         .debt_to_equity(1.6)
//!         .ebit_margin(0.04)
//!         .total_assets(0.0)
//!         .esg_score(45.0)
//!         .carbon_intensity(900.0)
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let outcomes = pipeline.run(&records, "Disorderly", 1.0);
//! assert!(outcomes[0].is_ok());
//! assert!(outcomes[1].error().is_some());
//!
//! let summary = PortfolioSummary::from_outcomes(&outcomes, 0.25);
//! assert_eq!(summary.failed, 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod parallel;
pub mod pipeline;
pub mod quality;
pub mod scenarios;
pub mod summary;

pub use pipeline::{RecordOutcome, RiskPipeline, ScoringResult};
pub use quality::DataQualityReport;
pub use scenarios::{ScenarioDefinition, ScenarioEngine, ScenarioSet};
pub use summary::{PortfolioSummary, RiskLevel, ScenarioComparison, SectorBreakdown};
