//! # credit_models: PD Scoring and Capital (L2: Models)
//!
//! This crate provides the quantitative building blocks of the risk pipeline:
//! - [`Scorer`]: logistic PD from financial ratios, plus the ESG-adjusted PD
//! - [`CapitalCalculator`]: `pd * assets * lgd`
//! - [`CalibrationReport`]: predicted PD against observed defaults
//!
//! Every component is constructed from a validated
//! [`RiskConfig`](infra_config::RiskConfig) and is a pure function of its
//! inputs afterwards, so it can be shared across threads by reference.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod calibration;
pub mod capital;
pub mod scoring;

pub use calibration::CalibrationReport;
pub use capital::CapitalCalculator;
pub use scoring::{EsgPenalty, PdEstimate, Scorer};
