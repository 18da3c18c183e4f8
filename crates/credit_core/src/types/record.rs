//! Per-company feature snapshots.
//!
//! [`FeatureRecord`] is the unit of computation: an immutable set of financial
//! ratios and ESG inputs for one company. [`RawFeatureRecord`] is its boundary
//! form, with every numeric field optional, as delivered by an ingestion
//! collaborator (for example a CSV table). Conversion validates field presence
//! and finiteness; missing values are never defaulted to zero.
//!
//! Domain constraints that depend on configuration (ESG bounds) or on a later
//! stage (positive assets for capital) are checked by the component that owns
//! them, so a batch can report them per record.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::error::{ensure_finite, RiskError};
use super::ids::CompanyId;

/// Immutable financial and ESG snapshot of one company.
///
/// Built through [`FeatureRecord::builder`] or converted from a
/// [`RawFeatureRecord`]; either way every numeric field is present and finite.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRecord {
    company: CompanyId,
    industry: Option<String>,
    debt_to_equity: f64,
    ebit_margin: f64,
    total_assets: f64,
    esg_score: f64,
    carbon_intensity: f64,
    lgd: Option<f64>,
    defaulted: Option<bool>,
}

impl FeatureRecord {
    /// Starts a builder for the given company.
    pub fn builder(company: impl Into<CompanyId>) -> FeatureRecordBuilder {
        FeatureRecordBuilder::new(company)
    }

    /// Company name or ticker.
    #[inline]
    pub fn company(&self) -> &CompanyId {
        &self.company
    }

    /// Industry or sector label, if known.
    #[inline]
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    /// Debt-to-equity ratio.
    #[inline]
    pub fn debt_to_equity(&self) -> f64 {
        self.debt_to_equity
    }

    /// EBIT margin.
    #[inline]
    pub fn ebit_margin(&self) -> f64 {
        self.ebit_margin
    }

    /// Total assets in currency units.
    #[inline]
    pub fn total_assets(&self) -> f64 {
        self.total_assets
    }

    /// ESG composite score.
    #[inline]
    pub fn esg_score(&self) -> f64 {
        self.esg_score
    }

    /// Carbon intensity (e.g. tCO2e per revenue unit).
    #[inline]
    pub fn carbon_intensity(&self) -> f64 {
        self.carbon_intensity
    }

    /// Per-record loss-given-default override.
    #[inline]
    pub fn lgd(&self) -> Option<f64> {
        self.lgd
    }

    /// Observed default flag. Used for calibration diagnostics only.
    #[inline]
    pub fn defaulted(&self) -> Option<bool> {
        self.defaulted
    }
}

/// Builder for [`FeatureRecord`].
///
/// # Examples
///
/// ```
/// use credit_core::types::{FeatureRecord, RiskError};
///
/// let missing = FeatureRecord::builder("RWE").debt_to_equity(1.2).build();
/// assert!(matches!(missing, Err(RiskError::InvalidInput(_))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FeatureRecordBuilder {
    company: CompanyId,
    industry: Option<String>,
    debt_to_equity: Option<f64>,
    ebit_margin: Option<f64>,
    total_assets: Option<f64>,
    esg_score: Option<f64>,
    carbon_intensity: Option<f64>,
    lgd: Option<f64>,
    defaulted: Option<bool>,
}

impl FeatureRecordBuilder {
    /// Creates an empty builder for the given company.
    pub fn new(company: impl Into<CompanyId>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }

    /// Sets the industry label.
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Sets the debt-to-equity ratio.
    pub fn debt_to_equity(mut self, value: f64) -> Self {
        self.debt_to_equity = Some(value);
        self
    }

    /// Sets the EBIT margin.
    pub fn ebit_margin(mut self, value: f64) -> Self {
        self.ebit_margin = Some(value);
        self
    }

    /// Sets total assets.
    pub fn total_assets(mut self, value: f64) -> Self {
        self.total_assets = Some(value);
        self
    }

    /// Sets the ESG composite score.
    pub fn esg_score(mut self, value: f64) -> Self {
        self.esg_score = Some(value);
        self
    }

    /// Sets carbon intensity.
    pub fn carbon_intensity(mut self, value: f64) -> Self {
        self.carbon_intensity = Some(value);
        self
    }

    /// Sets a per-record LGD override.
    pub fn lgd(mut self, value: f64) -> Self {
        self.lgd = Some(value);
        self
    }

    /// Sets the observed default flag.
    pub fn defaulted(mut self, value: bool) -> Self {
        self.defaulted = Some(value);
        self
    }

    /// Validates presence and finiteness and builds the record.
    ///
    /// # Errors
    /// Returns [`RiskError::InvalidInput`] if the company id is blank, a required
    /// field is missing, or any numeric field is NaN or infinite.
    pub fn build(self) -> Result<FeatureRecord, RiskError> {
        if self.company.is_blank() {
            return Err(RiskError::invalid_input("company identifier is empty"));
        }

        let required = |field: &'static str, value: Option<f64>| -> Result<f64, RiskError> {
            let value = value.ok_or_else(|| {
                RiskError::InvalidInput(format!("{}: missing {}", self.company, field))
            })?;
            ensure_finite(field, value)
                .map_err(|e| RiskError::InvalidInput(format!("{}: {}", self.company, e)))
        };

        let debt_to_equity = required("debt_to_equity", self.debt_to_equity)?;
        let ebit_margin = required("ebit_margin", self.ebit_margin)?;
        let total_assets = required("total_assets", self.total_assets)?;
        let esg_score = required("esg_score", self.esg_score)?;
        let carbon_intensity = required("carbon_intensity", self.carbon_intensity)?;
        let lgd = self.lgd.map(|v| required("lgd", Some(v))).transpose()?;

        let industry = self
            .industry
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(FeatureRecord {
            company: self.company,
            industry,
            debt_to_equity,
            ebit_margin,
            total_assets,
            esg_score,
            carbon_intensity,
            lgd,
            defaulted: self.defaulted,
        })
    }
}

/// Boundary form of a feature record, with every field optional.
///
/// Column names follow the snake_case schema; the aliases accept the legacy
/// dataset headers (`Ticker`, `Debt/Equity`, `EBIT_Margin`, ...).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawFeatureRecord {
    /// Company name or ticker
    #[serde(alias = "Ticker", alias = "company")]
    pub ticker: Option<String>,
    /// Industry or sector label
    #[serde(default, alias = "Industry", alias = "sector")]
    pub industry: Option<String>,
    /// Debt-to-equity ratio
    #[serde(default, alias = "Debt/Equity")]
    pub debt_to_equity: Option<f64>,
    /// EBIT margin
    #[serde(default, alias = "EBIT_Margin")]
    pub ebit_margin: Option<f64>,
    /// Total assets
    #[serde(default, alias = "TotalAssets")]
    pub total_assets: Option<f64>,
    /// ESG composite score
    #[serde(default, alias = "ESG_Score")]
    pub esg_score: Option<f64>,
    /// Carbon intensity
    #[serde(default, alias = "CarbonIntensity")]
    pub carbon_intensity: Option<f64>,
    /// Loss-given-default override
    #[serde(default, alias = "LGD")]
    pub lgd: Option<f64>,
    /// Observed default flag
    #[serde(default, alias = "Defaulted", deserialize_with = "deserialize_flag")]
    pub defaulted: Option<bool>,
    /// Why the row could not be read, when a cell failed to parse
    #[serde(skip)]
    pub unreadable: Option<String>,
}

impl RawFeatureRecord {
    /// A row whose cells could not be parsed. It keeps the identifying fields
    /// and fails conversion with `reason`.
    pub fn unreadable(
        ticker: Option<String>,
        industry: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            ticker,
            industry,
            unreadable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Label used to tag errors for this row: the ticker, or `row <index>`
    /// when the ticker itself is missing.
    pub fn label(&self, index: usize) -> CompanyId {
        match self.ticker.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => CompanyId::new(t),
            _ => CompanyId::new(format!("row {}", index + 1)),
        }
    }
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`; blank means unlabelled.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Int(0)) => Ok(Some(false)),
        Some(Flag::Int(1)) => Ok(Some(true)),
        Some(Flag::Int(n)) => Err(D::Error::custom(format!("invalid default flag: {}", n))),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid default flag: {}", other))),
        },
    }
}

impl TryFrom<RawFeatureRecord> for FeatureRecord {
    type Error = RiskError;

    fn try_from(raw: RawFeatureRecord) -> Result<Self, Self::Error> {
        if let Some(reason) = raw.unreadable {
            return Err(RiskError::InvalidInput(reason));
        }
        let company = raw.ticker.map(|t| t.trim().to_string()).unwrap_or_default();

        let mut builder = FeatureRecord::builder(company);
        builder.industry = raw.industry;
        builder.debt_to_equity = raw.debt_to_equity;
        builder.ebit_margin = raw.ebit_margin;
        builder.total_assets = raw.total_assets;
        builder.esg_score = raw.esg_score;
        builder.carbon_intensity = raw.carbon_intensity;
        builder.lgd = raw.lgd;
        builder.defaulted = raw.defaulted;
        builder.build()
    }
}
