//! Property tests for PD bounds and ESG monotonicity.

use credit_core::types::FeatureRecord;
use credit_models::{CapitalCalculator, Scorer};
use infra_config::RiskConfig;
use proptest::prelude::*;

fn record(de: f64, margin: f64, esg: f64, ci: f64) -> FeatureRecord {
    FeatureRecord::builder("PROP")
        .debt_to_equity(de)
        .ebit_margin(margin)
        .total_assets(1.0e6)
        .esg_score(esg)
        .carbon_intensity(ci)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_pd_in_open_unit_interval(
        de in 0.0_f64..50.0,
        margin in -5.0_f64..5.0,
        esg in 0.0_f64..=100.0,
        ci in 0.0_f64..10_000.0,
    ) {
        let scorer = Scorer::new(&RiskConfig::default()).unwrap();
        let pd = scorer.score(&record(de, margin, esg, ci)).unwrap();
        prop_assert!(pd.raw_pd > 0.0 && pd.raw_pd < 1.0);
        prop_assert!(pd.esg_adjusted_pd > 0.0 && pd.esg_adjusted_pd < 1.0);
        prop_assert!(pd.esg_adjusted_pd >= pd.raw_pd);
    }

    #[test]
    fn test_lower_esg_never_reduces_pd(
        de in 0.0_f64..5.0,
        esg in 0.0_f64..=100.0,
        drop in 0.0_f64..=100.0,
        ci in 0.0_f64..2_000.0,
    ) {
        let scorer = Scorer::new(&RiskConfig::default()).unwrap();
        let worse = (esg - drop).max(0.0);
        let a = scorer.score(&record(de, 0.05, esg, ci)).unwrap();
        let b = scorer.score(&record(de, 0.05, worse, ci)).unwrap();
        prop_assert!(b.esg_adjusted_pd >= a.esg_adjusted_pd);
    }

    #[test]
    fn test_capital_is_product(
        pd in 0.0_f64..=1.0,
        assets in 1.0_f64..1.0e12,
        lgd in 0.01_f64..=1.0,
    ) {
        let calc = CapitalCalculator::new(0.45).unwrap();
        let capital = calc.capital(pd, assets, lgd).unwrap();
        prop_assert_eq!(capital, pd * assets * lgd);
        prop_assert!(capital >= 0.0);
    }
}
