//! Validate command implementation
//!
//! Runs data-quality checks on a feature table without scoring it.

use std::io::Write;
use std::path::Path;

use credit_risk::DataQualityReport;
use infra_config::RiskConfig;
use tracing::info;

use crate::io::read_records;
use crate::{CliError, Result};

/// Check the table and print the findings.
///
/// Fails with [`CliError::InvalidData`] when the table is not fit for scoring.
pub fn run(config: &RiskConfig, input: &Path) -> Result<()> {
    info!("Validating {}", input.display());
    let records = read_records(input)?;
    let report = DataQualityReport::assess(&records, config);

    let mut out = std::io::stdout().lock();
    write_report(&report, &mut out)?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidData(format!(
            "{} of {} row(s) usable",
            report.convertible, report.rows
        )))
    }
}

/// Render findings as text.
pub fn write_report<W: Write>(report: &DataQualityReport, mut w: W) -> Result<()> {
    writeln!(
        w,
        "Rows: {}  convertible: {}  status: {}",
        report.rows,
        report.convertible,
        if report.is_valid() { "OK" } else { "INVALID" }
    )?;
    for line in report.findings() {
        writeln!(w, "  - {}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_table_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticker,debt_to_equity,ebit_margin,total_assets,esg_score").unwrap();
        writeln!(file, "A,0.5,0.1,1000000,80").unwrap();

        let err = run(&RiskConfig::default(), file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidData(_)));
    }

    #[test]
    fn test_write_report_lists_findings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ticker,debt_to_equity,ebit_margin,total_assets,esg_score,carbon_intensity"
        )
        .unwrap();
        writeln!(file, "A,0.5,0.1,1000000,80,900").unwrap();
        writeln!(file, "A,0.5,0.1,1000000,80,10").unwrap();

        let records = read_records(file.path()).unwrap();
        let report = DataQualityReport::assess(&records, &RiskConfig::default());
        let mut buf = Vec::new();
        write_report(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("INVALID"));
        assert!(text.contains("1 high emitter(s)"));
        assert!(text.contains("Duplicate tickers: A"));
    }
}
