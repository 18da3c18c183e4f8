//! Data-quality checks on boundary records before scoring.
//!
//! Flags the issues a reviewer should see before trusting a run: missing
//! columns, unreadable cells, unconvertible rows, out-of-range ESG scores, negative carbon
//! intensities, heavy emitters and repeated tickers.

use std::collections::{BTreeMap, HashSet};

use credit_core::types::{FeatureRecord, RawFeatureRecord};
use infra_config::RiskConfig;
use serde::Serialize;
use tracing::debug;

/// Columns every record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "ticker",
    "debt_to_equity",
    "ebit_margin",
    "total_assets",
    "esg_score",
    "carbon_intensity",
];

/// Findings for one batch of boundary records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityReport {
    /// Rows inspected
    pub rows: usize,
    /// Rows that convert into a [`FeatureRecord`]
    pub convertible: usize,
    /// Rows with a cell that could not be parsed
    pub unreadable_rows: usize,
    /// Missing-value count per required column (zero counts omitted)
    pub missing_by_field: BTreeMap<&'static str, usize>,
    /// Required columns missing from every row
    pub absent_fields: Vec<&'static str>,
    /// ESG scores outside the configured score range
    pub esg_out_of_range: usize,
    /// Negative carbon intensities
    pub negative_carbon: usize,
    /// Negative debt-to-equity ratios
    pub negative_leverage: usize,
    /// Zero or negative total assets
    pub non_positive_assets: usize,
    /// Carbon intensities above the high-emitter threshold
    pub high_emitters: usize,
    /// Tickers appearing more than once, in first-repeat order
    pub duplicate_tickers: Vec<String>,
}

impl DataQualityReport {
    /// Inspect a batch against the configured bounds and thresholds.
    pub fn assess(records: &[RawFeatureRecord], config: &RiskConfig) -> Self {
        let mut missing: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut report = Self {
            rows: records.len(),
            convertible: 0,
            unreadable_rows: 0,
            missing_by_field: BTreeMap::new(),
            absent_fields: Vec::new(),
            esg_out_of_range: 0,
            negative_carbon: 0,
            negative_leverage: 0,
            non_positive_assets: 0,
            high_emitters: 0,
            duplicate_tickers: Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut repeated = HashSet::new();

        for raw in records {
            let ticker = raw
                .ticker
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty());
            if let Some(t) = ticker {
                if !seen.insert(t) && repeated.insert(t) {
                    report.duplicate_tickers.push(t.to_string());
                }
            }
            if raw.unreadable.is_some() {
                report.unreadable_rows += 1;
                continue;
            }

            let present = [
                ticker.is_some(),
                raw.debt_to_equity.is_some(),
                raw.ebit_margin.is_some(),
                raw.total_assets.is_some(),
                raw.esg_score.is_some(),
                raw.carbon_intensity.is_some(),
            ];
            for (field, is_present) in REQUIRED_FIELDS.iter().zip(present) {
                if !is_present {
                    *missing.entry(*field).or_insert(0) += 1;
                }
            }

            if let Some(esg) = raw.esg_score {
                if !(config.esg.score_min..=config.esg.score_max).contains(&esg) {
                    report.esg_out_of_range += 1;
                }
            }
            if let Some(ci) = raw.carbon_intensity {
                if ci < 0.0 {
                    report.negative_carbon += 1;
                } else if ci > config.high_emitter_threshold {
                    report.high_emitters += 1;
                }
            }
            if raw.debt_to_equity.is_some_and(|de| de < 0.0) {
                report.negative_leverage += 1;
            }
            if raw.total_assets.is_some_and(|a| a <= 0.0) {
                report.non_positive_assets += 1;
            }

            if FeatureRecord::try_from(raw.clone()).is_ok() {
                report.convertible += 1;
            }
        }

        let readable = report.rows - report.unreadable_rows;
        if readable > 0 {
            report.absent_fields = REQUIRED_FIELDS
                .iter()
                .copied()
                .filter(|f| missing.get(f).copied() == Some(readable))
                .collect();
        }
        report.missing_by_field = missing;

        debug!(
            rows = report.rows,
            convertible = report.convertible,
            unreadable = report.unreadable_rows,
            duplicates = report.duplicate_tickers.len(),
            "Data quality assessed"
        );
        report
    }

    /// False when a required column is absent, a row cannot be converted, or
    /// a ticker repeats.
    pub fn is_valid(&self) -> bool {
        self.absent_fields.is_empty()
            && self.convertible == self.rows
            && self.duplicate_tickers.is_empty()
    }

    /// Human-readable findings, one line each; empty when nothing to report.
    pub fn findings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for field in &self.absent_fields {
            lines.push(format!("Missing required column: {}", field));
        }
        for (field, count) in &self.missing_by_field {
            if !self.absent_fields.contains(field) {
                lines.push(format!("{}: {} missing value(s)", field, count));
            }
        }
        if self.unreadable_rows > 0 {
            lines.push(format!(
                "{} row(s) with unparseable values",
                self.unreadable_rows
            ));
        }
        if self.convertible < self.rows {
            lines.push(format!(
                "{} of {} row(s) cannot be scored",
                self.rows - self.convertible,
                self.rows
            ));
        }
        let counts = [
            (self.esg_out_of_range, "ESG score(s) out of range"),
            (self.negative_carbon, "negative carbon intensity value(s)"),
            (self.negative_leverage, "negative debt-to-equity value(s)"),
            (self.non_positive_assets, "non-positive total asset value(s)"),
            (self.high_emitters, "high emitter(s)"),
        ];
        for (count, label) in counts {
            if count > 0 {
                lines.push(format!("{} {}", count, label));
            }
        }
        if !self.duplicate_tickers.is_empty() {
            lines.push(format!(
                "Duplicate tickers: {}",
                self.duplicate_tickers.join(", ")
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ticker: &str, esg: f64, ci: f64) -> RawFeatureRecord {
        RawFeatureRecord {
            ticker: Some(ticker.to_string()),
            industry: Some("Energy".to_string()),
            debt_to_equity: Some(0.8),
            ebit_margin: Some(0.05),
            total_assets: Some(1.0e6),
            esg_score: Some(esg),
            carbon_intensity: Some(ci),
            ..RawFeatureRecord::default()
        }
    }

    #[test]
    fn test_clean_batch_is_valid() {
        let report = DataQualityReport::assess(
            &[raw("A", 60.0, 100.0), raw("B", 70.0, 200.0)],
            &RiskConfig::default(),
        );
        assert!(report.is_valid());
        assert!(report.findings().is_empty());
        assert_eq!(report.convertible, 2);
    }

    #[test]
    fn test_counts_issues() {
        let records = vec![
            raw("A", 120.0, 100.0),
            raw("B", 50.0, -5.0),
            raw("C", 50.0, 800.0),
            raw("A", 50.0, 10.0),
        ];
        let report = DataQualityReport::assess(&records, &RiskConfig::default());
        assert_eq!(report.esg_out_of_range, 1);
        assert_eq!(report.negative_carbon, 1);
        assert_eq!(report.high_emitters, 1);
        assert_eq!(report.duplicate_tickers, vec!["A".to_string()]);
        // Range checks happen at scoring, so all four still convert.
        assert_eq!(report.convertible, 4);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_absent_column() {
        let mut a = raw("A", 60.0, 100.0);
        let mut b = raw("B", 60.0, 100.0);
        a.carbon_intensity = None;
        b.carbon_intensity = None;
        let report = DataQualityReport::assess(&[a, b], &RiskConfig::default());
        assert_eq!(report.absent_fields, vec!["carbon_intensity"]);
        assert_eq!(report.convertible, 0);
        assert!(!report.is_valid());
        assert_eq!(report.findings()[0], "Missing required column: carbon_intensity");
    }

    #[test]
    fn test_partial_missing() {
        let mut b = raw("B", 60.0, 100.0);
        b.esg_score = None;
        let report =
            DataQualityReport::assess(&[raw("A", 60.0, 100.0), b], &RiskConfig::default());
        assert!(report.absent_fields.is_empty());
        assert_eq!(report.missing_by_field.get("esg_score"), Some(&1));
        assert_eq!(report.convertible, 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_unreadable_rows_counted() {
        let records = vec![
            raw("A", 60.0, 100.0),
            RawFeatureRecord::unreadable(Some("B".to_string()), None, "bad cell"),
            raw("C", 60.0, 100.0),
        ];
        let report = DataQualityReport::assess(&records, &RiskConfig::default());
        assert_eq!(report.unreadable_rows, 1);
        assert_eq!(report.convertible, 2);
        assert!(report.missing_by_field.is_empty());
        assert!(report.absent_fields.is_empty());
        assert!(!report.is_valid());
        assert!(report
            .findings()
            .contains(&"1 row(s) with unparseable values".to_string()));
    }

    #[test]
    fn test_empty_batch() {
        let report = DataQualityReport::assess(&[], &RiskConfig::default());
        assert!(report.is_valid());
        assert_eq!(report.rows, 0);
    }
}
