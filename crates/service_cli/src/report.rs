//! Score report assembly and rendering (table, CSV, JSON).

use std::io::Write;

use chrono::Utc;
use clap::ValueEnum;
use credit_models::CalibrationReport;
use credit_risk::summary::{calibration, rank_by_scenario_pd, sector_breakdown};
use credit_risk::{PortfolioSummary, RecordOutcome, RiskLevel, ScoringResult, SectorBreakdown};
use serde::Serialize;

use crate::Result;

/// Output format for score results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table on stdout
    Table,
    /// One row per scored company
    Csv,
    /// Full report document
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// One report line for a scored company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Company identifier
    pub company: String,
    /// Industry label
    pub industry: Option<String>,
    /// ESG composite score
    pub esg_score: f64,
    /// Carbon intensity
    pub carbon_intensity: f64,
    /// PD from financial ratios only
    pub raw_pd: f64,
    /// PD including the ESG penalty
    pub esg_adjusted_pd: f64,
    /// PD under the scenario
    pub scenario_adjusted_pd: f64,
    /// Scenario multiplier applied
    pub effective_multiplier: f64,
    /// Total assets
    pub total_assets: f64,
    /// LGD applied
    pub lgd: f64,
    /// Capital requirement
    pub capital_requirement: f64,
    /// Risk bucket at the configured threshold
    pub risk_level: RiskLevel,
}

impl ReportRow {
    fn new(result: &ScoringResult, high_risk_threshold: f64) -> Self {
        Self {
            company: result.company.to_string(),
            industry: result.industry.clone(),
            esg_score: result.esg_score,
            carbon_intensity: result.carbon_intensity,
            raw_pd: result.raw_pd,
            esg_adjusted_pd: result.esg_adjusted_pd,
            scenario_adjusted_pd: result.scenario_adjusted_pd,
            effective_multiplier: result.effective_multiplier,
            total_assets: result.total_assets,
            lgd: result.lgd,
            capital_requirement: result.capital_requirement,
            risk_level: RiskLevel::classify(result.scenario_adjusted_pd, high_risk_threshold),
        }
    }
}

/// A record that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRow {
    /// Position in the input table (zero-based)
    pub index: usize,
    /// Company or `row N`
    pub company: String,
    /// Error category
    pub kind: &'static str,
    /// Error message
    pub error: String,
}

/// Complete result of a `score` run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// RFC 3339 generation timestamp
    pub generated_at: String,
    /// Scenario name as configured
    pub scenario: String,
    /// Sensitivity applied
    pub sensitivity: f64,
    /// Headline metrics
    pub summary: PortfolioSummary,
    /// Per-industry aggregates
    pub sectors: Vec<SectorBreakdown>,
    /// Scored rows, highest scenario PD first
    pub results: Vec<ReportRow>,
    /// Records that failed, in input order
    pub failures: Vec<FailureRow>,
    /// Calibration against labelled records, if any
    pub calibration: Option<CalibrationReport>,
}

impl ScoreReport {
    /// Assemble a report from pipeline outcomes.
    ///
    /// `top` limits the result rows; summary figures always cover the whole batch.
    pub fn build(
        scenario: &str,
        sensitivity: f64,
        outcomes: &[RecordOutcome],
        high_risk_threshold: f64,
        top: Option<usize>,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            scenario: scenario.to_string(),
            sensitivity,
            summary: PortfolioSummary::from_outcomes(outcomes, high_risk_threshold),
            sectors: sector_breakdown(outcomes),
            results: rank_by_scenario_pd(outcomes, top)
                .into_iter()
                .map(|r| ReportRow::new(r, high_risk_threshold))
                .collect(),
            failures: outcomes
                .iter()
                .filter_map(|o| {
                    o.error().map(|err| FailureRow {
                        index: o.index,
                        company: o.company.to_string(),
                        kind: err.kind(),
                        error: err.to_string(),
                    })
                })
                .collect(),
            calibration: calibration(outcomes),
        }
    }

    /// Write the result rows as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in &self.results {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the full report as pretty JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Write the report as aligned text.
    pub fn write_table<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(
            w,
            "Scenario: {} (sensitivity {:.2})  generated {}",
            self.scenario, self.sensitivity, self.generated_at
        )?;
        writeln!(w)?;
        writeln!(
            w,
            "{:<12} {:<16} {:>6} {:>8} {:>8} {:>8} {:>8} {:>16}  {}",
            "Company", "Industry", "ESG", "Carbon", "Raw PD", "ESG PD", "Scen PD", "Capital", "Risk"
        )?;
        writeln!(w, "{}", "-".repeat(104))?;
        for r in &self.results {
            writeln!(
                w,
                "{:<12} {:<16} {:>6.1} {:>8.1} {:>8.4} {:>8.4} {:>8.4} {:>16.2}  {}",
                truncate(&r.company, 12),
                truncate(r.industry.as_deref().unwrap_or("-"), 16),
                r.esg_score,
                r.carbon_intensity,
                r.raw_pd,
                r.esg_adjusted_pd,
                r.scenario_adjusted_pd,
                r.capital_requirement,
                r.risk_level
            )?;
        }

        let s = &self.summary;
        writeln!(w)?;
        writeln!(
            w,
            "Scored {} of {} record(s), {} high risk",
            s.scored, s.records, s.high_risk_count
        )?;
        writeln!(
            w,
            "Mean PD  raw {:.4}  ESG {:.4}  scenario {:.4}",
            s.mean_raw_pd, s.mean_esg_adjusted_pd, s.mean_scenario_adjusted_pd
        )?;
        writeln!(
            w,
            "Total capital {:.2} ({:.4}% of assets)",
            s.total_capital,
            s.capital_ratio() * 100.0
        )?;

        if !self.sectors.is_empty() {
            writeln!(w)?;
            writeln!(w, "{:<20} {:>9} {:>10} {:>16}", "Sector", "Companies", "Mean PD", "Capital")?;
            for sector in &self.sectors {
                writeln!(
                    w,
                    "{:<20} {:>9} {:>10.4} {:>16.2}",
                    truncate(&sector.industry, 20),
                    sector.companies,
                    sector.mean_scenario_adjusted_pd,
                    sector.total_capital
                )?;
            }
        }

        if let Some(c) = &self.calibration {
            writeln!(w)?;
            writeln!(
                w,
                "Calibration: {} labelled, observed rate {:.4}, mean ESG PD {:.4}, Brier {:.4}",
                c.observations, c.observed_default_rate, c.mean_predicted_pd, c.brier_score
            )?;
        }

        if !self.failures.is_empty() {
            writeln!(w)?;
            writeln!(w, "Failed records:")?;
            for f in &self.failures {
                writeln!(w, "  [{}] {}: {}", f.index + 1, f.company, f.error)?;
            }
        }
        Ok(())
    }

    /// Write in the requested format.
    pub fn write<W: Write>(&self, format: OutputFormat, writer: W) -> Result<()> {
        match format {
            OutputFormat::Table => self.write_table(writer),
            OutputFormat::Csv => self.write_csv(writer),
            OutputFormat::Json => self.write_json(writer),
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_core::types::{CompanyId, RiskError};

    fn outcomes() -> Vec<RecordOutcome> {
        let result = |company: &str, pd: f64| ScoringResult {
            company: CompanyId::new(company),
            industry: Some("Energy".to_string()),
            scenario: "Hot House".to_string(),
            sensitivity: 1.0,
            esg_score: 40.0,
            carbon_intensity: 700.0,
            total_assets: 1_000.0,
            raw_pd: pd / 2.0,
            esg_adjusted_pd: pd / 1.5,
            scenario_adjusted_pd: pd,
            effective_multiplier: 1.5,
            lgd: 0.45,
            capital_requirement: pd * 450.0,
            defaulted: Some(pd > 0.2),
        };
        vec![
            RecordOutcome {
                index: 0,
                company: CompanyId::new("LOW"),
                result: Ok(result("LOW", 0.05)),
            },
            RecordOutcome {
                index: 1,
                company: CompanyId::new("row 2"),
                result: Err(RiskError::InvalidInput("row 2: missing esg_score".to_string())),
            },
            RecordOutcome {
                index: 2,
                company: CompanyId::new("HIGH"),
                result: Ok(result("HIGH", 0.4)),
            },
        ]
    }

    #[test]
    fn test_report_sorted_with_failures() {
        let report = ScoreReport::build("Hot House", 1.0, &outcomes(), 0.25, None);
        assert_eq!(report.results[0].company, "HIGH");
        assert_eq!(report.results[0].risk_level, RiskLevel::HighRisk);
        assert_eq!(report.results[1].risk_level, RiskLevel::Safe);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].kind, "invalid_input");
        assert_eq!(report.calibration.unwrap().observations, 2);
    }

    #[test]
    fn test_top_limits_rows_not_summary() {
        let report = ScoreReport::build("Hot House", 1.0, &outcomes(), 0.25, Some(1));
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.summary.scored, 2);
    }

    #[test]
    fn test_csv_output() {
        let report = ScoreReport::build("Hot House", 1.0, &outcomes(), 0.25, None);
        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("company,industry,esg_score"));
        assert!(lines.next().unwrap().starts_with("HIGH,Energy"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_json_output() {
        let report = ScoreReport::build("Hot House", 1.0, &outcomes(), 0.25, None);
        let mut buf = Vec::new();
        report.write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["scenario"], "Hot House");
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["results"][0]["risk_level"], "HighRisk");
    }

    #[test]
    fn test_table_lists_failures() {
        let report = ScoreReport::build("Hot House", 1.0, &outcomes(), 0.25, None);
        let mut buf = Vec::new();
        report.write_table(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Failed records:"));
        assert!(text.contains("missing esg_score"));
        assert!(text.contains("High Risk"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Energy", 10), "Energy");
        assert_eq!(truncate("Consumer Discretionary", 10), "Consumer ~");
    }
}
