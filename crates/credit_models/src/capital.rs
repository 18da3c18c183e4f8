//! Simplified capital requirement.
//!
//! ```text
//! capital = pd * assets * lgd
//! ```
//!
//! This is a stress-capital proxy, not a regulatory formula.

use credit_core::types::{FeatureRecord, RiskError};
use infra_config::{ConfigError, RiskConfig};

/// Capital requirement calculator with a default loss-given-default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalCalculator {
    default_lgd: f64,
}

impl CapitalCalculator {
    /// Create a calculator with the given default LGD.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `default_lgd` is outside (0, 1].
    pub fn new(default_lgd: f64) -> Result<Self, ConfigError> {
        if !lgd_in_range(default_lgd) {
            return Err(ConfigError::invalid(
                "default_lgd",
                format!("must be in (0, 1], got {}", default_lgd),
            ));
        }
        Ok(Self { default_lgd })
    }

    /// Create a calculator from a configuration.
    pub fn from_config(config: &RiskConfig) -> Result<Self, ConfigError> {
        Self::new(config.default_lgd)
    }

    /// Default LGD applied when a record has no override.
    #[inline]
    pub fn default_lgd(&self) -> f64 {
        self.default_lgd
    }

    /// LGD for a record: its override, or the default.
    #[inline]
    pub fn lgd_for(&self, record: &FeatureRecord) -> f64 {
        record.lgd().unwrap_or(self.default_lgd)
    }

    /// Capital requirement `pd * assets * lgd`.
    ///
    /// # Errors
    /// Returns [`RiskError::InvalidInput`] when `assets` is not a positive finite
    /// number, `lgd` is outside (0, 1], or `pd` is outside [0, 1].
    ///
    /// # Example
    ///
    /// ```
    /// use credit_models::CapitalCalculator;
    ///
    /// let calc = CapitalCalculator::new(0.45).unwrap();
    /// let capital = calc.capital(0.02, 1_000_000.0, 0.45).unwrap();
    /// assert!((capital - 9_000.0).abs() < 1e-9);
    /// assert!(calc.capital(0.02, 0.0, 0.45).is_err());
    /// ```
    pub fn capital(&self, pd: f64, assets: f64, lgd: f64) -> Result<f64, RiskError> {
        if !(assets.is_finite() && assets > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "total_assets must be positive, got {}",
                assets
            )));
        }
        if !lgd_in_range(lgd) {
            return Err(RiskError::InvalidInput(format!(
                "lgd must be in (0, 1], got {}",
                lgd
            )));
        }
        if !(0.0..=1.0).contains(&pd) {
            return Err(RiskError::InvalidInput(format!(
                "pd must be in [0, 1], got {}",
                pd
            )));
        }
        Ok(pd * assets * lgd)
    }

    /// Capital requirement for a record at the given PD.
    ///
    /// Returns the LGD applied alongside the capital figure.
    pub fn capital_for(&self, pd: f64, record: &FeatureRecord) -> Result<(f64, f64), RiskError> {
        let lgd = self.lgd_for(record);
        let capital = self
            .capital(pd, record.total_assets(), lgd)
            .map_err(|e| match e {
                RiskError::InvalidInput(msg) => {
                    RiskError::InvalidInput(format!("{}: {}", record.company(), msg))
                }
                other => other,
            })?;
        Ok((lgd, capital))
    }
}

#[inline]
fn lgd_in_range(lgd: f64) -> bool {
    lgd > 0.0 && lgd <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(assets: f64) -> FeatureRecord {
        FeatureRecord::builder("BMW")
            .debt_to_equity(1.1)
            .ebit_margin(0.08)
            .total_assets(assets)
            .esg_score(70.0)
            .carbon_intensity(120.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_capital_exact_product() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        let pd = 0.0612;
        let capital = calc.capital(pd, 1_000_000.0, 0.45).unwrap();
        assert_eq!(capital, pd * 1_000_000.0 * 0.45);
    }

    #[test]
    fn test_capital_zero_pd() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        assert_eq!(calc.capital(0.0, 1_000.0, 0.45).unwrap(), 0.0);
    }

    #[test]
    fn test_non_positive_assets_rejected() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        assert!(matches!(
            calc.capital(0.1, 0.0, 0.45),
            Err(RiskError::InvalidInput(_))
        ));
        assert!(calc.capital(0.1, -5.0, 0.45).is_err());
        assert!(calc.capital(0.1, f64::NAN, 0.45).is_err());
    }

    #[test]
    fn test_lgd_bounds() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        assert!(calc.capital(0.1, 100.0, 1.0).is_ok());
        assert!(calc.capital(0.1, 100.0, 0.0).is_err());
        assert!(calc.capital(0.1, 100.0, 1.2).is_err());
    }

    #[test]
    fn test_pd_bounds() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        assert!(calc.capital(-0.1, 100.0, 0.5).is_err());
        assert!(calc.capital(1.1, 100.0, 0.5).is_err());
    }

    #[test]
    fn test_invalid_default_lgd() {
        assert!(CapitalCalculator::new(0.0).is_err());
        assert!(CapitalCalculator::new(1.0).is_ok());
    }

    #[test]
    fn test_capital_for_uses_override() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        let with_override = FeatureRecord::builder("BMW")
            .debt_to_equity(1.1)
            .ebit_margin(0.08)
            .total_assets(2_000.0)
            .esg_score(70.0)
            .carbon_intensity(120.0)
            .lgd(0.6)
            .build()
            .unwrap();

        let (lgd, capital) = calc.capital_for(0.1, &with_override).unwrap();
        assert_eq!(lgd, 0.6);
        assert_eq!(capital, 0.1 * 2_000.0 * 0.6);

        let (lgd, _) = calc.capital_for(0.1, &record(2_000.0)).unwrap();
        assert_eq!(lgd, 0.45);
    }

    #[test]
    fn test_capital_for_tags_company() {
        let calc = CapitalCalculator::new(0.45).unwrap();
        let err = calc.capital_for(0.1, &record(0.0)).unwrap_err();
        assert!(err.to_string().contains("BMW"));
    }
}
