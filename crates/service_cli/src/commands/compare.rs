//! Compare command implementation
//!
//! Runs the feature table under every configured scenario.

use std::io::Write;
use std::path::Path;

use credit_risk::{RiskPipeline, ScenarioComparison};
use infra_config::RiskConfig;
use tracing::info;

use crate::io::read_records;
use crate::Result;

/// Score the table under every scenario.
///
/// Rows that cannot be converted fail in every scenario and are counted in
/// each summary, matching the `score` totals.
pub fn build_comparison(
    config: &RiskConfig,
    input: &Path,
    sensitivity: f64,
) -> Result<ScenarioComparison> {
    let pipeline = RiskPipeline::new(config)?;
    let records = read_records(input)?;
    Ok(pipeline.compare_raw(&records, sensitivity)?)
}

/// Render a comparison as text.
pub fn write_comparison<W: Write>(comparison: &ScenarioComparison, mut w: W) -> Result<()> {
    let worst = comparison.worst_case().map(|s| s.scenario.as_str());
    writeln!(w, "Scenario comparison (sensitivity {:.2})", comparison.sensitivity)?;
    if let Some(first) = comparison.scenarios.first() {
        writeln!(
            w,
            "Records: {}  scored: {}  failed: {}",
            first.summary.records, first.summary.scored, first.summary.failed
        )?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "{:<20} {:>10} {:>10} {:>10} {:>16}  ",
        "Scenario", "Multiplier", "Mean PD", "High risk", "Capital"
    )?;
    for s in &comparison.scenarios {
        writeln!(
            w,
            "{:<20} {:>10.2} {:>10.4} {:>10} {:>16.2}  {}",
            s.scenario,
            s.base_multiplier,
            s.summary.mean_scenario_adjusted_pd,
            s.summary.high_risk_count,
            s.summary.total_capital,
            if Some(s.scenario.as_str()) == worst { "worst case" } else { "" }
        )?;
    }
    Ok(())
}

/// Run the compare command
pub fn run(config: &RiskConfig, input: &Path, sensitivity: f64, json: bool) -> Result<()> {
    info!("Comparing scenarios...");
    info!("  Input: {}", input.display());
    info!("  Sensitivity: {}", sensitivity);

    let comparison = build_comparison(config, input, sensitivity)?;
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &comparison)?;
        writeln!(out)?;
    } else {
        write_comparison(&comparison, &mut out)?;
    }
    Ok(())
}
