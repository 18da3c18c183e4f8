//! Calibration diagnostics against observed defaults.
//!
//! Compares predicted PDs with the default flags carried by a labelled sample.
//! Diagnostics only: coefficients are fitted offline and never updated here.

use serde::Serialize;

/// Summary of predicted PDs against observed outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReport {
    /// Number of labelled observations
    pub observations: usize,
    /// Number of observed defaults
    pub defaults: usize,
    /// Observed default rate
    pub observed_default_rate: f64,
    /// Mean predicted PD
    pub mean_predicted_pd: f64,
    /// Mean squared error between PD and outcome
    pub brier_score: f64,
}

impl CalibrationReport {
    /// Build a report from `(predicted_pd, defaulted)` pairs.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// # Example
    ///
    /// ```
    /// use credit_models::CalibrationReport;
    ///
    /// let report = CalibrationReport::from_pairs([(0.1, false), (0.8, true)]).unwrap();
    /// assert_eq!(report.defaults, 1);
    /// assert!((report.brier_score - 0.025).abs() < 1e-12);
    /// ```
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, bool)>) -> Option<Self> {
        let mut n = 0usize;
        let mut defaults = 0usize;
        let mut pd_sum = 0.0;
        let mut sq_sum = 0.0;

        for (pd, defaulted) in pairs {
            let outcome = if defaulted { 1.0 } else { 0.0 };
            n += 1;
            defaults += defaulted as usize;
            pd_sum += pd;
            sq_sum += (pd - outcome).powi(2);
        }

        if n == 0 {
            return None;
        }

        let count = n as f64;
        Some(Self {
            observations: n,
            defaults,
            observed_default_rate: defaults as f64 / count,
            mean_predicted_pd: pd_sum / count,
            brier_score: sq_sum / count,
        })
    }

    /// Mean predicted PD minus observed default rate.
    ///
    /// Positive means the model is conservative on this sample.
    pub fn calibration_gap(&self) -> f64 {
        self.mean_predicted_pd - self.observed_default_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_sample() {
        assert!(CalibrationReport::from_pairs(std::iter::empty()).is_none());
    }

    #[test]
    fn test_perfect_forecast() {
        let report = CalibrationReport::from_pairs([(0.0, false), (1.0, true)]).unwrap();
        assert_eq!(report.brier_score, 0.0);
        assert_eq!(report.observed_default_rate, 0.5);
        assert_eq!(report.calibration_gap(), 0.0);
    }

    #[test]
    fn test_conservative_model() {
        let report =
            CalibrationReport::from_pairs([(0.2, false), (0.3, false), (0.4, false)]).unwrap();
        assert_eq!(report.defaults, 0);
        assert_relative_eq!(report.mean_predicted_pd, 0.3, epsilon = 1e-12);
        assert!(report.calibration_gap() > 0.0);
        assert_relative_eq!(report.brier_score, (0.04 + 0.09 + 0.16) / 3.0, epsilon = 1e-12);
    }
}
