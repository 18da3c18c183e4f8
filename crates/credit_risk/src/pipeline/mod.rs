//! Batch risk pipeline: Scorer → ScenarioEngine → CapitalCalculator.
//!
//! Each record runs through the full chain independently. A failure in one
//! record becomes a tagged error entry at that record's position and never
//! aborts the batch.

mod result;

pub use result::{scored, RecordOutcome, ScoringResult};

use std::collections::HashSet;

use credit_core::types::{CompanyId, FeatureRecord, RawFeatureRecord, RiskError};
use credit_models::{CapitalCalculator, Scorer};
use infra_config::{ConfigError, RiskConfig};
use tracing::{debug, info, warn};

use crate::parallel::{map_indexed, ParallelConfig};
use crate::scenarios::{ScenarioDefinition, ScenarioEngine};
use crate::summary::{PortfolioSummary, ScenarioComparison, ScenarioSummary};

/// Climate-adjusted credit risk pipeline.
///
/// Read-only after construction and safe to share across threads.
///
/// # Example
///
/// ```
/// use credit_core::types::FeatureRecord;
/// use credit_risk::RiskPipeline;
/// use infra_config::RiskConfig;
///
/// let pipeline = RiskPipeline::new(&RiskConfig::default()).unwrap();
/// let record = FeatureRecord::builder("SAP")
///     .debt_to_equity(0.5)
///     .ebit_margin(0.1)
///     .total_assets(1_000_000.0)
///     .esg_score(80.0)
///     .carbon_intensity(10.0)
///     .build()
///     .unwrap();
///
/// let outcomes = pipeline.run(&[record], "Orderly", 1.0);
/// let result = outcomes[0].result.as_ref().unwrap();
/// assert!(result.scenario_adjusted_pd >= result.esg_adjusted_pd);
/// ```
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    scorer: Scorer,
    engine: ScenarioEngine,
    capital: CapitalCalculator,
    parallel: ParallelConfig,
    high_risk_threshold: f64,
}

impl RiskPipeline {
    /// Build the pipeline from a configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the configuration is incoherent.
    pub fn new(config: &RiskConfig) -> Result<Self, ConfigError> {
        let pipeline = Self {
            scorer: Scorer::new(config)?,
            engine: ScenarioEngine::new(config)?,
            capital: CapitalCalculator::from_config(config)?,
            parallel: ParallelConfig::from(&config.parallel),
            high_risk_threshold: config.high_risk_threshold,
        };
        debug!(
            scenarios = ?pipeline.engine.scenarios().names(),
            batch_size = pipeline.parallel.batch_size,
            parallel_threshold = pipeline.parallel.parallel_threshold,
            "Risk pipeline ready"
        );
        Ok(pipeline)
    }

    /// PD scorer.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Scenario engine.
    pub fn engine(&self) -> &ScenarioEngine {
        &self.engine
    }

    /// Capital calculator.
    pub fn capital(&self) -> &CapitalCalculator {
        &self.capital
    }

    /// Threshold above which a scenario PD counts as high risk.
    pub fn high_risk_threshold(&self) -> f64 {
        self.high_risk_threshold
    }

    /// Run one record through the full chain.
    pub fn score_record(
        &self,
        record: &FeatureRecord,
        scenario: &str,
        sensitivity: f64,
    ) -> Result<ScoringResult, RiskError> {
        let def = self.engine.resolve(scenario)?;
        self.engine.check_sensitivity(sensitivity)?;
        self.score_with(record, def, sensitivity)
    }

    fn score_with(
        &self,
        record: &FeatureRecord,
        scenario: &ScenarioDefinition,
        sensitivity: f64,
    ) -> Result<ScoringResult, RiskError> {
        let pd = self.scorer.score(record)?;
        let adjustment = self.engine.adjust(
            scenario,
            sensitivity,
            pd.esg_adjusted_pd,
            record.carbon_intensity(),
        )?;
        let (lgd, capital_requirement) = self
            .capital
            .capital_for(adjustment.scenario_adjusted_pd, record)?;

        debug!(
            company = %record.company(),
            scenario = scenario.name(),
            scenario_adjusted_pd = adjustment.scenario_adjusted_pd,
            capital_requirement,
            "Record scored"
        );

        Ok(ScoringResult {
            company: record.company().clone(),
            industry: record.industry().map(str::to_string),
            scenario: scenario.name().to_string(),
            sensitivity,
            esg_score: record.esg_score(),
            carbon_intensity: record.carbon_intensity(),
            total_assets: record.total_assets(),
            raw_pd: pd.raw_pd,
            esg_adjusted_pd: pd.esg_adjusted_pd,
            scenario_adjusted_pd: adjustment.scenario_adjusted_pd,
            effective_multiplier: adjustment.effective_multiplier,
            lgd,
            capital_requirement,
            defaulted: record.defaulted(),
        })
    }

    /// Score a batch under one scenario.
    ///
    /// Output has one entry per input record, in input order. An unknown
    /// scenario or out-of-range sensitivity fails every record with the same
    /// error. A company repeated within the batch fails at every occurrence
    /// after the first.
    pub fn run(
        &self,
        records: &[FeatureRecord],
        scenario: &str,
        sensitivity: f64,
    ) -> Vec<RecordOutcome> {
        let duplicates = duplicate_positions(records.iter().map(FeatureRecord::company));
        let outcomes = match self.resolve_run(scenario, sensitivity) {
            Ok(def) => map_indexed(records, &self.parallel, |index, record| RecordOutcome {
                index,
                company: record.company().clone(),
                result: if duplicates.contains(&index) {
                    Err(duplicate_error(record.company()))
                } else {
                    self.score_with(record, def, sensitivity)
                },
            }),
            Err(err) => fail_all(records.iter().map(|r| r.company().clone()), err),
        };
        self.log_batch(&outcomes, scenario, sensitivity);
        outcomes
    }

    /// Score a batch of boundary records.
    ///
    /// Records that fail conversion become [`RiskError::InvalidInput`]
    /// entries tagged with their ticker, or `row N` when unnamed.
    pub fn run_raw(
        &self,
        records: &[RawFeatureRecord],
        scenario: &str,
        sensitivity: f64,
    ) -> Vec<RecordOutcome> {
        let labels: Vec<CompanyId> = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.label(i))
            .collect();
        let duplicates = duplicate_positions(labels.iter());

        let outcomes = match self.resolve_run(scenario, sensitivity) {
            Ok(def) => map_indexed(records, &self.parallel, |index, raw| {
                let company = labels[index].clone();
                let result = if duplicates.contains(&index) {
                    Err(duplicate_error(&company))
                } else {
                    FeatureRecord::try_from(raw.clone())
                        .map_err(|e| tag_row(&company, e))
                        .and_then(|record| self.score_with(&record, def, sensitivity))
                };
                RecordOutcome {
                    index,
                    company,
                    result,
                }
            }),
            Err(err) => fail_all(labels.into_iter(), err),
        };
        self.log_batch(&outcomes, scenario, sensitivity);
        outcomes
    }

    /// Run the batch under every configured scenario.
    ///
    /// # Errors
    /// Returns [`RiskError::OutOfRange`] for a sensitivity outside bounds.
    pub fn compare_scenarios(
        &self,
        records: &[FeatureRecord],
        sensitivity: f64,
    ) -> Result<ScenarioComparison, RiskError> {
        self.compare_with(sensitivity, |scenario| {
            self.run(records, scenario, sensitivity)
        })
    }

    /// Run a batch of boundary records under every configured scenario.
    ///
    /// Rows that fail conversion count as failed records in every scenario's
    /// summary.
    ///
    /// # Errors
    /// Returns [`RiskError::OutOfRange`] for a sensitivity outside bounds.
    pub fn compare_raw(
        &self,
        records: &[RawFeatureRecord],
        sensitivity: f64,
    ) -> Result<ScenarioComparison, RiskError> {
        self.compare_with(sensitivity, |scenario| {
            self.run_raw(records, scenario, sensitivity)
        })
    }

    fn compare_with<F>(&self, sensitivity: f64, run: F) -> Result<ScenarioComparison, RiskError>
    where
        F: Fn(&str) -> Vec<RecordOutcome>,
    {
        self.engine.check_sensitivity(sensitivity)?;
        let scenarios = self
            .engine
            .scenarios()
            .iter()
            .map(|def| {
                let outcomes = run(def.name());
                ScenarioSummary {
                    scenario: def.name().to_string(),
                    base_multiplier: def.base_multiplier(),
                    summary: PortfolioSummary::from_outcomes(&outcomes, self.high_risk_threshold),
                }
            })
            .collect();
        Ok(ScenarioComparison {
            sensitivity,
            scenarios,
        })
    }

    /// Portfolio summary of a scored batch using the configured threshold.
    pub fn summarise(&self, outcomes: &[RecordOutcome]) -> PortfolioSummary {
        PortfolioSummary::from_outcomes(outcomes, self.high_risk_threshold)
    }

    fn resolve_run(
        &self,
        scenario: &str,
        sensitivity: f64,
    ) -> Result<&ScenarioDefinition, RiskError> {
        let def = self.engine.resolve(scenario)?;
        self.engine.check_sensitivity(sensitivity)?;
        Ok(def)
    }

    fn log_batch(&self, outcomes: &[RecordOutcome], scenario: &str, sensitivity: f64) {
        let mut failed = 0usize;
        for outcome in outcomes {
            if let Err(err) = &outcome.result {
                failed += 1;
                warn!(
                    index = outcome.index,
                    company = %outcome.company,
                    kind = err.kind(),
                    error = %err,
                    "Record failed"
                );
            }
        }
        info!(
            records = outcomes.len(),
            scored = outcomes.len() - failed,
            failed,
            scenario,
            sensitivity,
            "Batch scored"
        );
    }
}

fn duplicate_positions<'a>(ids: impl Iterator<Item = &'a CompanyId>) -> HashSet<usize> {
    let mut seen = HashSet::new();
    ids.enumerate()
        .filter_map(|(i, id)| (!seen.insert(id.as_str())).then_some(i))
        .collect()
}

fn duplicate_error(company: &CompanyId) -> RiskError {
    RiskError::InvalidInput(format!("{}: duplicate company in batch", company))
}

fn tag_row(company: &CompanyId, err: RiskError) -> RiskError {
    match err {
        RiskError::InvalidInput(msg) if !msg.starts_with(company.as_str()) => {
            RiskError::InvalidInput(format!("{}: {}", company, msg))
        }
        other => other,
    }
}

fn fail_all(companies: impl Iterator<Item = CompanyId>, err: RiskError) -> Vec<RecordOutcome> {
    companies
        .enumerate()
        .map(|(index, company)| RecordOutcome {
            index,
            company,
            result: Err(err.clone()),
        })
        .collect()
}
