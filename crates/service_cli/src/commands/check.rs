//! Check command implementation
//!
//! Validates the effective configuration and prints it as TOML.

use infra_config::RiskConfig;
use tracing::info;

use crate::Result;

/// Print the effective configuration.
pub fn run(config: &RiskConfig) -> Result<()> {
    config.validate()?;
    info!("Configuration is valid");
    print!("{}", config.to_toml_string()?);
    Ok(())
}
