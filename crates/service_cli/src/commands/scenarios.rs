//! Scenarios command implementation
//!
//! Lists the configured climate scenarios.

use std::io::Write;

use credit_risk::ScenarioSet;
use infra_config::RiskConfig;

use crate::Result;

/// Print the configured scenarios.
pub fn run(config: &RiskConfig) -> Result<()> {
    let set = ScenarioSet::from_specs(&config.scenarios)?;
    write_scenarios(&set, std::io::stdout().lock())
}

/// Render scenarios as text.
pub fn write_scenarios<W: Write>(set: &ScenarioSet, mut w: W) -> Result<()> {
    writeln!(w, "{:<20} {:>10}  {}", "Scenario", "Multiplier", "Description")?;
    for def in set.iter() {
        writeln!(
            w,
            "{:<20} {:>10.2}  {}",
            def.name(),
            def.base_multiplier(),
            def.description().unwrap_or("")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_presets() {
        let mut buf = Vec::new();
        write_scenarios(&ScenarioSet::presets(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Hot House"));
        assert!(text.contains("2.50"));
    }
}
