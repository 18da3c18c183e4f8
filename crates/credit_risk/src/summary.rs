//! Portfolio-level aggregation of pipeline outcomes.
//!
//! Everything here is derived from [`RecordOutcome`]s after the batch has
//! run; none of it feeds back into scoring.

use std::collections::BTreeMap;

use credit_models::CalibrationReport;
use serde::Serialize;

use crate::pipeline::{scored, RecordOutcome, ScoringResult};

/// Label used for records without an industry.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Coarse risk bucket for a scenario-adjusted PD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    /// PD strictly above the high-risk threshold
    HighRisk,
    /// Everything else
    Safe,
}

impl RiskLevel {
    /// Classify a PD against a threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use credit_risk::summary::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::classify(0.3, 0.25), RiskLevel::HighRisk);
    /// assert_eq!(RiskLevel::classify(0.25, 0.25), RiskLevel::Safe);
    /// ```
    #[inline]
    pub fn classify(pd: f64, threshold: f64) -> Self {
        if pd > threshold {
            RiskLevel::HighRisk
        } else {
            RiskLevel::Safe
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::HighRisk => "High Risk",
            RiskLevel::Safe => "Safe",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Headline metrics for a scored batch.
///
/// Means are over successfully scored records and are zero when none scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    /// Records submitted
    pub records: usize,
    /// Records scored successfully
    pub scored: usize,
    /// Records that failed
    pub failed: usize,
    /// Mean raw PD
    pub mean_raw_pd: f64,
    /// Mean ESG-adjusted PD
    pub mean_esg_adjusted_pd: f64,
    /// Mean scenario-adjusted PD
    pub mean_scenario_adjusted_pd: f64,
    /// Records classified [`RiskLevel::HighRisk`]
    pub high_risk_count: usize,
    /// Sum of capital requirements
    pub total_capital: f64,
    /// Sum of total assets of scored records
    pub total_assets: f64,
}

impl PortfolioSummary {
    /// Summarise a batch.
    pub fn from_outcomes(outcomes: &[RecordOutcome], high_risk_threshold: f64) -> Self {
        let mut summary = Self {
            records: outcomes.len(),
            scored: 0,
            failed: 0,
            mean_raw_pd: 0.0,
            mean_esg_adjusted_pd: 0.0,
            mean_scenario_adjusted_pd: 0.0,
            high_risk_count: 0,
            total_capital: 0.0,
            total_assets: 0.0,
        };

        for r in scored(outcomes) {
            summary.scored += 1;
            summary.mean_raw_pd += r.raw_pd;
            summary.mean_esg_adjusted_pd += r.esg_adjusted_pd;
            summary.mean_scenario_adjusted_pd += r.scenario_adjusted_pd;
            summary.total_capital += r.capital_requirement;
            summary.total_assets += r.total_assets;
            if RiskLevel::classify(r.scenario_adjusted_pd, high_risk_threshold)
                == RiskLevel::HighRisk
            {
                summary.high_risk_count += 1;
            }
        }
        summary.failed = summary.records - summary.scored;

        if summary.scored > 0 {
            let n = summary.scored as f64;
            summary.mean_raw_pd /= n;
            summary.mean_esg_adjusted_pd /= n;
            summary.mean_scenario_adjusted_pd /= n;
        }
        summary
    }

    /// Capital as a share of total assets, zero for an empty batch.
    pub fn capital_ratio(&self) -> f64 {
        if self.total_assets > 0.0 {
            self.total_capital / self.total_assets
        } else {
            0.0
        }
    }
}

/// Aggregates for one industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorBreakdown {
    /// Industry label, or [`UNCLASSIFIED`]
    pub industry: String,
    /// Scored companies in the industry
    pub companies: usize,
    /// Mean scenario-adjusted PD
    pub mean_scenario_adjusted_pd: f64,
    /// Sum of capital requirements
    pub total_capital: f64,
}

/// Per-industry aggregates, riskiest industry first.
///
/// Ties are broken by industry name so the order is deterministic.
pub fn sector_breakdown(outcomes: &[RecordOutcome]) -> Vec<SectorBreakdown> {
    let mut groups: BTreeMap<&str, (usize, f64, f64)> = BTreeMap::new();
    for r in scored(outcomes) {
        let key = r.industry.as_deref().unwrap_or(UNCLASSIFIED);
        let entry = groups.entry(key).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += r.scenario_adjusted_pd;
        entry.2 += r.capital_requirement;
    }

    let mut sectors: Vec<_> = groups
        .into_iter()
        .map(|(industry, (n, pd_sum, capital))| SectorBreakdown {
            industry: industry.to_string(),
            companies: n,
            mean_scenario_adjusted_pd: pd_sum / n as f64,
            total_capital: capital,
        })
        .collect();

    // Stable sort keeps the name order for equal PDs.
    sectors.sort_by(|a, b| {
        b.mean_scenario_adjusted_pd
            .total_cmp(&a.mean_scenario_adjusted_pd)
    });
    sectors
}

/// Scored results ranked by scenario-adjusted PD, highest first.
///
/// Equal PDs keep their input order. `limit` truncates the ranking.
pub fn rank_by_scenario_pd(outcomes: &[RecordOutcome], limit: Option<usize>) -> Vec<&ScoringResult> {
    let mut ranked: Vec<_> = scored(outcomes).collect();
    ranked.sort_by(|a, b| b.scenario_adjusted_pd.total_cmp(&a.scenario_adjusted_pd));
    if let Some(n) = limit {
        ranked.truncate(n);
    }
    ranked
}

/// Calibration of the ESG-adjusted PD against records carrying a default flag.
///
/// Returns `None` when no scored record is labelled.
pub fn calibration(outcomes: &[RecordOutcome]) -> Option<CalibrationReport> {
    CalibrationReport::from_pairs(
        scored(outcomes).filter_map(|r| r.defaulted.map(|d| (r.esg_adjusted_pd, d))),
    )
}

/// Portfolio summary for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    /// Scenario name
    pub scenario: String,
    /// Configured base multiplier
    pub base_multiplier: f64,
    /// Batch summary under this scenario
    pub summary: PortfolioSummary,
}

/// Side-by-side summaries of every configured scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    /// Sensitivity used for every scenario
    pub sensitivity: f64,
    /// One entry per scenario, in configuration order
    pub scenarios: Vec<ScenarioSummary>,
}

impl ScenarioComparison {
    /// Scenario with the largest total capital requirement.
    ///
    /// The first scenario wins a tie.
    pub fn worst_case(&self) -> Option<&ScenarioSummary> {
        self.scenarios.iter().reduce(|worst, s| {
            if s.summary.total_capital > worst.summary.total_capital {
                s
            } else {
                worst
            }
        })
    }
}
