//! End-to-end tests for the batch pipeline.

use approx::assert_relative_eq;
use credit_core::types::{FeatureRecord, RiskError};
use credit_risk::summary::{rank_by_scenario_pd, sector_breakdown};
use credit_risk::{PortfolioSummary, RiskPipeline};
use infra_config::{ParallelSettings, RiskConfig};

fn record(company: &str, assets: f64, esg: f64, ci: f64) -> FeatureRecord {
    FeatureRecord::builder(company)
        .industry(if ci > 300.0 { "Utilities" } else { "Technology" })
        .debt_to_equity(0.5)
        .ebit_margin(0.1)
        .total_assets(assets)
        .esg_score(esg)
        .carbon_intensity(ci)
        .build()
        .unwrap()
}

fn pipeline() -> RiskPipeline {
    RiskPipeline::new(&RiskConfig::default()).unwrap()
}

#[test]
fn test_end_to_end_example() {
    let outcomes = pipeline().run(&[record("SAP", 1_000_000.0, 80.0, 10.0)], "Orderly", 1.0);
    let r = outcomes[0].result.as_ref().unwrap();

    let raw_expected = 1.0 / (1.0 + 2.85_f64.exp());
    assert_relative_eq!(r.raw_pd, raw_expected, epsilon = 1e-12);
    assert!(r.esg_adjusted_pd > r.raw_pd);
    assert!(r.scenario_adjusted_pd > r.esg_adjusted_pd);
    assert_relative_eq!(
        r.scenario_adjusted_pd,
        r.esg_adjusted_pd * 1.002,
        epsilon = 1e-12
    );
    assert_eq!(
        r.capital_requirement,
        r.scenario_adjusted_pd * 1_000_000.0 * 0.45
    );
    assert_eq!(r.lgd, 0.45);
}

#[test]
fn test_batch_isolation() {
    let records = vec![
        record("A", 1.0e6, 70.0, 50.0),
        record("B", 0.0, 70.0, 50.0),
        record("C", 2.0e6, 60.0, 400.0),
    ];
    let outcomes = pipeline().run(&records, "Disorderly", 1.0);

    assert_eq!(outcomes.len(), 3);
    let indices: Vec<usize> = outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(outcomes[0].is_ok());
    assert!(outcomes[2].is_ok());
    assert_eq!(outcomes[1].company.as_str(), "B");
    assert!(matches!(
        outcomes[1].error(),
        Some(RiskError::InvalidInput(msg)) if msg.contains("B")
    ));
}

#[test]
fn test_unknown_scenario_fails_every_record() {
    let records = vec![
        record("A", 1.0e6, 70.0, 50.0),
        record("B", 1.0e6, 70.0, 50.0),
    ];
    let outcomes = pipeline().run(&records, "Net Zero Now", 1.0);
    assert_eq!(outcomes.len(), 2);
    for o in &outcomes {
        assert_eq!(
            o.error(),
            Some(&RiskError::UnknownScenario("Net Zero Now".to_string()))
        );
    }
}

#[test]
fn test_zero_sensitivity_matches_esg_pd() {
    let p = pipeline();
    let records = vec![
        record("A", 1.0e6, 10.0, 2_000.0),
        record("B", 1.0e6, 95.0, 0.0),
    ];
    for scenario in ["Orderly", "Disorderly", "Hot House"] {
        for o in p.run(&records, scenario, 0.0) {
            let r = o.result.unwrap();
            assert_eq!(r.scenario_adjusted_pd, r.esg_adjusted_pd);
            assert_eq!(r.effective_multiplier, 1.0);
        }
    }
}

#[test]
fn test_parallel_batch_preserves_order() {
    let mut config = RiskConfig::default();
    config.parallel = ParallelSettings {
        batch_size: 8,
        parallel_threshold: 16,
    };
    let parallel = RiskPipeline::new(&config).unwrap();
    let records: Vec<_> = (0..500)
        .map(|i| {
            record(
                &format!("C{:04}", i),
                1.0e6 + i as f64,
                (i % 100) as f64,
                (i * 7 % 1_500) as f64,
            )
        })
        .collect();

    let par = parallel.run(&records, "Hot House", 1.5);
    let seq = pipeline().run(&records, "Hot House", 1.5);

    assert_eq!(par.len(), 500);
    for (i, (a, b)) in par.iter().zip(&seq).enumerate() {
        assert_eq!(a.index, i);
        assert_eq!(a.company.as_str(), format!("C{:04}", i));
        assert_eq!(a, b);
    }
}

#[test]
fn test_summary_and_sectors() {
    let p = pipeline();
    let records = vec![
        record("A", 1.0e6, 30.0, 900.0),
        record("B", 1.0e6, 90.0, 5.0),
        record("C", 0.0, 90.0, 5.0),
    ];
    let outcomes = p.run(&records, "Hot House", 2.0);
    let summary: PortfolioSummary = p.summarise(&outcomes);

    assert_eq!(summary.scored, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.total_capital > 0.0);

    let sectors = sector_breakdown(&outcomes);
    assert_eq!(sectors[0].industry, "Utilities");

    let ranked = rank_by_scenario_pd(&outcomes, Some(1));
    assert_eq!(ranked[0].company.as_str(), "A");
}
