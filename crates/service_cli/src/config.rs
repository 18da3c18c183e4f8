//! Configuration loading for the CLI.

use std::path::Path;

use infra_config::{load_config, load_file, RiskConfig};
use tracing::info;

use crate::Result;

/// Resolve the risk configuration for this invocation.
///
/// Without a file, built-in defaults apply. Environment overrides
/// (`CLIMATE_RISK_*`) are layered on top unless `ignore_env` is set.
pub fn load(path: Option<&Path>, ignore_env: bool) -> Result<RiskConfig> {
    let config = match (path, ignore_env) {
        (Some(p), true) => load_file(p)?,
        (None, true) => RiskConfig::default(),
        (p, false) => load_config(p)?,
    };
    let source = path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    info!(
        source = %source,
        env_overrides = !ignore_env,
        scenarios = config.scenarios.len(),
        "Configuration loaded"
    );
    Ok(config)
}
