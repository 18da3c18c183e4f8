//! Feature table input and report file placement.

use std::path::{Path, PathBuf};

use credit_core::types::RawFeatureRecord;
use tracing::{info, warn};

use crate::{CliError, Result};

/// Read a finalized feature table from CSV.
///
/// Headers may use the snake_case schema or the legacy dataset names
/// (`Ticker`, `Debt/Equity`, ...). Empty cells are read as missing. A row with
/// a cell that does not parse is kept as an unreadable record, so it fails on
/// its own when scored.
pub fn read_records(path: &Path) -> Result<Vec<RawFeatureRecord>> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let ticker_col = column(&headers, &["ticker", "company"]);
    let industry_col = column(&headers, &["industry", "sector"]);

    let mut records = Vec::new();
    let mut unreadable = 0usize;
    for row in reader.records() {
        let row = row?;
        match row.deserialize::<RawFeatureRecord>(Some(&headers)) {
            Ok(record) => records.push(record),
            Err(err) => {
                unreadable += 1;
                let reason = describe(&err, &headers, &row);
                let cell = |col: Option<usize>| {
                    col.and_then(|i| row.get(i))
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                };
                warn!(line = ?row.position().map(|p| p.line()), %reason, "Unreadable row");
                records.push(RawFeatureRecord::unreadable(
                    cell(ticker_col),
                    cell(industry_col),
                    reason,
                ));
            }
        }
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        unreadable,
        "Feature table loaded"
    );
    Ok(records)
}

fn column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

fn describe(err: &csv::Error, headers: &csv::StringRecord, row: &csv::StringRecord) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => {
                let index = field as usize;
                format!(
                    "{}: cannot parse '{}' ({})",
                    headers.get(index).unwrap_or("?"),
                    row.get(index).unwrap_or(""),
                    err.kind()
                )
            }
            None => err.kind().to_string(),
        },
        _ => err.to_string(),
    }
}

/// File-name friendly form of a scenario name: `Hot House` -> `hot_house`.
pub fn scenario_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

/// Destination for a report: `output` itself, or
/// `output/climate_risk_report_<slug>.<ext>` when `output` is a directory.
pub fn report_path(output: &Path, scenario: &str, extension: &str) -> PathBuf {
    if output.is_dir() {
        output.join(format!(
            "climate_risk_report_{}.{}",
            scenario_slug(scenario),
            extension
        ))
    } else {
        output.to_path_buf()
    }
}
