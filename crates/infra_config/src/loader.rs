//! Layered configuration loading.
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`CLIMATE_RISK_<FIELD>`, nested with `__`)
//! 2. Config file (TOML)
//! 3. Default values

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::error::ConfigError;
use crate::risk::RiskConfig;

/// Prefix of environment variable overrides.
///
/// `CLIMATE_RISK_PD_CEILING=0.99` sets `pd_ceiling`;
/// `CLIMATE_RISK_ESG__WEIGHT=0.8` sets `esg.weight`.
pub const ENV_PREFIX: &str = "CLIMATE_RISK";

/// Load and validate a [`RiskConfig`] from an optional TOML file plus environment overrides.
///
/// # Errors
/// Returns [`ConfigError::FileError`] if `path` is given but does not exist,
/// [`ConfigError::Source`] if a source cannot be parsed, and any validation error.
pub fn load_config(path: Option<&Path>) -> Result<RiskConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::FileError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), "Adding configuration file source");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: RiskConfig = builder.build()?.try_deserialize()?;
    config.validate()?;

    debug!(
        scenarios = config.scenarios.len(),
        pd_ceiling = config.pd_ceiling,
        default_lgd = config.default_lgd,
        "Risk configuration loaded"
    );
    Ok(config)
}

/// Load a configuration file directly, without environment overrides.
pub fn load_file(path: &Path) -> Result<RiskConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
    RiskConfig::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/climate_risk.toml")));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_load_file_missing() {
        let result = load_file(Path::new("/nonexistent/climate_risk.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }
}
