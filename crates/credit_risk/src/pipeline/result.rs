//! Per-record pipeline output.

use credit_core::types::{CompanyId, RiskError};
use serde::Serialize;

/// Full scoring chain output for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Company identifier
    pub company: CompanyId,
    /// Industry label, if known
    pub industry: Option<String>,
    /// Scenario name as configured
    pub scenario: String,
    /// Sensitivity applied
    pub sensitivity: f64,
    /// ESG composite score used
    pub esg_score: f64,
    /// Carbon intensity used
    pub carbon_intensity: f64,
    /// Total assets
    pub total_assets: f64,
    /// PD from financial ratios only
    pub raw_pd: f64,
    /// PD including the ESG penalty
    pub esg_adjusted_pd: f64,
    /// PD under the climate scenario
    pub scenario_adjusted_pd: f64,
    /// Scenario multiplier applied to the ESG-adjusted PD
    pub effective_multiplier: f64,
    /// LGD applied
    pub lgd: f64,
    /// Capital requirement at the scenario-adjusted PD
    pub capital_requirement: f64,
    /// Observed default flag, when labelled
    pub defaulted: Option<bool>,
}

impl ScoringResult {
    /// ESG-adjusted PD minus raw PD.
    #[inline]
    pub fn esg_impact(&self) -> f64 {
        self.esg_adjusted_pd - self.raw_pd
    }

    /// Scenario-adjusted PD minus ESG-adjusted PD.
    #[inline]
    pub fn scenario_impact(&self) -> f64 {
        self.scenario_adjusted_pd - self.esg_adjusted_pd
    }
}

/// Outcome for one input record, in input position.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// Zero-based position in the input batch
    pub index: usize,
    /// Company the outcome belongs to (`row N` when unnamed)
    pub company: CompanyId,
    /// Result or per-record error
    pub result: Result<ScoringResult, RiskError>,
}

impl RecordOutcome {
    /// Whether the record scored successfully.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The scored result, if any.
    #[inline]
    pub fn scored(&self) -> Option<&ScoringResult> {
        self.result.as_ref().ok()
    }

    /// The error, if any.
    #[inline]
    pub fn error(&self) -> Option<&RiskError> {
        self.result.as_ref().err()
    }
}

/// Iterate over the successfully scored results of a batch.
pub fn scored(outcomes: &[RecordOutcome]) -> impl Iterator<Item = &ScoringResult> {
    outcomes.iter().filter_map(RecordOutcome::scored)
}
