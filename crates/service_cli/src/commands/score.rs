//! Score command implementation
//!
//! Scores a feature table under one scenario and prints or exports the report.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use credit_risk::RiskPipeline;
use infra_config::RiskConfig;
use tracing::info;

use crate::io::{read_records, report_path};
use crate::report::{OutputFormat, ScoreReport};
use crate::{CliError, Result};

/// Options for one scoring run.
pub struct ScoreOptions<'a> {
    /// Feature table (CSV)
    pub input: &'a Path,
    /// Scenario name
    pub scenario: &'a str,
    /// Scenario sensitivity
    pub sensitivity: f64,
    /// Output format
    pub format: OutputFormat,
    /// Output file or directory; stdout when absent
    pub output: Option<&'a Path>,
    /// Limit on result rows
    pub top: Option<usize>,
}

/// Score the table and build the report without writing it.
///
/// Run-level problems (unknown scenario, sensitivity out of range) are
/// returned as errors before any record is scored.
pub fn build_report(config: &RiskConfig, opts: &ScoreOptions<'_>) -> Result<ScoreReport> {
    let pipeline = RiskPipeline::new(config)?;
    let scenario = pipeline.engine().resolve(opts.scenario)?.name().to_string();
    pipeline.engine().check_sensitivity(opts.sensitivity)?;

    let records = read_records(opts.input)?;
    let outcomes = pipeline.run_raw(&records, &scenario, opts.sensitivity);

    Ok(ScoreReport::build(
        &scenario,
        opts.sensitivity,
        &outcomes,
        pipeline.high_risk_threshold(),
        opts.top,
    ))
}

/// Run the score command
pub fn run(config: &RiskConfig, opts: &ScoreOptions<'_>) -> Result<()> {
    info!("Starting scoring...");
    info!("  Input: {}", opts.input.display());
    info!("  Scenario: {}", opts.scenario);
    info!("  Sensitivity: {}", opts.sensitivity);

    let report = build_report(config, opts)?;

    match opts.output {
        Some(output) => {
            if opts.format == OutputFormat::Table {
                return Err(CliError::InvalidArgument(
                    "table format prints to stdout; use --format csv or json with --output"
                        .to_string(),
                ));
            }
            let path = report_path(output, &report.scenario, opts.format.extension());
            let file = BufWriter::new(File::create(&path)?);
            report.write(opts.format, file)?;
            info!(
                path = %path.display(),
                rows = report.results.len(),
                failed = report.failures.len(),
                "Report written"
            );
        }
        None => report.write(opts.format, std::io::stdout().lock())?,
    }

    info!("Scoring complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ticker,industry,debt_to_equity,ebit_margin,total_assets,esg_score,carbon_intensity"
        )
        .unwrap();
        writeln!(file, "SAP,Technology,0.5,0.1,1000000,80,10").unwrap();
        writeln!(file, "RWE,Utilities,1.4,0.05,0,45,900").unwrap();
        writeln!(file, "BAS,Materials,0.9,0.08,3000000,60,450").unwrap();
        file
    }

    fn opts<'a>(input: &'a Path, scenario: &'a str) -> ScoreOptions<'a> {
        ScoreOptions {
            input,
            scenario,
            sensitivity: 1.0,
            format: OutputFormat::Csv,
            output: None,
            top: None,
        }
    }

    #[test]
    fn test_build_report_isolates_failures() {
        let file = table();
        let report = build_report(&RiskConfig::default(), &opts(file.path(), "disorderly")).unwrap();
        assert_eq!(report.scenario, "Disorderly");
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].company, "RWE");
        assert!(report.results[0].scenario_adjusted_pd >= report.results[1].scenario_adjusted_pd);
    }

    #[test]
    fn test_unparseable_cell_fails_only_its_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ticker,debt_to_equity,ebit_margin,total_assets,esg_score,carbon_intensity"
        )
        .unwrap();
        writeln!(file, "SAP,0.5,0.1,1000000,80,10").unwrap();
        writeln!(file, "VOW,n/a,0.06,5000000,55,120").unwrap();
        writeln!(file, "BMW,0.9,0.09,4000000,60,100").unwrap();

        let report = build_report(&RiskConfig::default(), &opts(file.path(), "Orderly")).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].company, "VOW");
        assert_eq!(report.failures[0].kind, "invalid_input");
        assert!(report.failures[0].error.contains("n/a"));
    }

    #[test]
    fn test_unknown_scenario_is_run_error() {
        let file = table();
        let err = build_report(&RiskConfig::default(), &opts(file.path(), "Net Zero Now"))
            .unwrap_err();
        assert!(matches!(err, CliError::Risk(_)));
    }

    #[test]
    fn test_writes_named_report_into_directory() {
        let file = table();
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(file.path(), "Hot House");
        o.output = Some(dir.path());
        run(&RiskConfig::default(), &o).unwrap();

        let written = dir.path().join("climate_risk_report_hot_house.csv");
        let text = std::fs::read_to_string(written).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_table_to_file_rejected() {
        let file = table();
        let dir = tempfile::tempdir().unwrap();
        let mut o = opts(file.path(), "Orderly");
        o.format = OutputFormat::Table;
        o.output = Some(dir.path());
        assert!(matches!(
            run(&RiskConfig::default(), &o),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
