//! Exposure analytics and treaty arithmetic
//!
//! Everything here is a pure function over entities already loaded from the
//! store: parsing the JSON blobs stored on exposure files, the gross-up factor
//! used in rate analysis, and the single-treaty report / two-treaty
//! comparison.

use crate::core::entity::{Contract, ExposureFile, TopCompany};
use crate::core::error::TreatyError;
use crate::core::validation::validators::{validate_decimal, validate_non_negative};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use validator::Validate;

/// Maximum number of entries kept in a `topCompanies` list
pub const TOP_COMPANIES_LIMIT: usize = 20;

/// Gross-up factor shown before any rate row is complete
pub const DEFAULT_GROSS_UP_FACTOR: f64 = 1.2;

/// Underwriting year buckets of the rate-change table
pub const RATE_YEARS: [&str; 5] = ["2026", "2025", "2024", "2023", "2022 and prior"];

/// Label → weight mapping decoded from a breakdown blob
pub type Breakdown = BTreeMap<String, f64>;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object mapping labels to numbers")]
    NotAnObject,

    #[error("value for '{key}' is not a number")]
    NotANumber { key: String },

    #[error("expected a JSON array")]
    NotAnArray,
}

impl From<BlobError> for TreatyError {
    fn from(err: BlobError) -> Self {
        TreatyError::Internal(format!("stored exposure data is corrupt: {}", err))
    }
}

/// Decode `exposureByCountry`, `exposureByIndustry` or `currencyDistribution`
pub fn parse_breakdown(blob: &str) -> Result<Breakdown, BlobError> {
    let value: Value = serde_json::from_str(blob)?;
    let Value::Object(entries) = value else {
        return Err(BlobError::NotAnObject);
    };

    entries
        .into_iter()
        .map(|(key, value)| match value.as_f64() {
            Some(weight) => Ok((key, weight)),
            None => Err(BlobError::NotANumber { key }),
        })
        .collect()
}

/// Decode `topCompanies` or `detailedData` as a list of raw records
pub fn parse_records(blob: &str) -> Result<Vec<Value>, BlobError> {
    match serde_json::from_str(blob)? {
        Value::Array(records) => Ok(records),
        _ => Err(BlobError::NotAnArray),
    }
}

/// Decode `topCompanies`, ranked and capped
pub fn parse_top_companies(blob: &str) -> Result<Vec<TopCompany>, BlobError> {
    if !blob.trim_start().starts_with('[') {
        return Err(BlobError::NotAnArray);
    }
    let companies: Vec<TopCompany> = serde_json::from_str(blob)?;
    Ok(rank_top_companies(companies))
}

/// Sort descending by sum insured and keep the first [`TOP_COMPANIES_LIMIT`]
pub fn rank_top_companies(mut companies: Vec<TopCompany>) -> Vec<TopCompany> {
    companies.sort_by(|a, b| b.sum_insured.total_cmp(&a.sum_insured));
    companies.truncate(TOP_COMPANIES_LIMIT);
    companies
}

/// Numeric value of a user-typed amount; anything unparseable counts as 0
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn decimal_string<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

/// One bar of a breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

pub fn chart_points(breakdown: &Breakdown) -> Vec<ChartPoint> {
    breakdown
        .iter()
        .map(|(name, value)| ChartPoint {
            name: name.clone(),
            value: *value,
        })
        .collect()
}

/// Parsed view of a single exposure file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureOverview {
    pub id: u64,
    pub file_id: String,
    pub imported_by: String,
    pub imported_at: DateTime<Utc>,
    pub count: u64,
    #[serde(rename = "totalGWP")]
    pub total_gwp: String,
    pub tsi_amount: String,
    pub matched_companies_percent: f64,
    pub exposure_by_country: Vec<ChartPoint>,
    pub exposure_by_industry: Vec<ChartPoint>,
    pub currency_distribution: Vec<ChartPoint>,
    pub top_companies: Vec<TopCompany>,
}

impl ExposureOverview {
    pub fn from_file(file: &ExposureFile) -> Result<Self, BlobError> {
        Ok(Self {
            id: file.id,
            file_id: file.file_id.clone(),
            imported_by: file.imported_by.clone(),
            imported_at: file.imported_at,
            count: file.count,
            total_gwp: file.total_gwp.clone(),
            tsi_amount: file.tsi_amount.clone(),
            matched_companies_percent: round1(parse_amount(&file.matched_companies_percent)),
            exposure_by_country: chart_points(&parse_breakdown(&file.exposure_by_country)?),
            exposure_by_industry: chart_points(&parse_breakdown(&file.exposure_by_industry)?),
            currency_distribution: chart_points(&parse_breakdown(&file.currency_distribution)?),
            top_companies: parse_top_companies(&file.top_companies)?,
        })
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// Gross-up factor
// =============================================================================

/// One row of the rate-change table, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRate {
    pub year: String,
    #[serde(default)]
    pub rate: String,
    #[serde(rename = "exposureGWP", default)]
    pub exposure_gwp: String,
    #[serde(default)]
    pub egpi: String,
}

impl YearlyRate {
    pub fn new(
        year: impl Into<String>,
        rate: impl Into<String>,
        exposure_gwp: impl Into<String>,
        egpi: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            rate: rate.into(),
            exposure_gwp: exposure_gwp.into(),
            egpi: egpi.into(),
        }
    }

    /// A row takes part in the calculation once all three inputs are filled
    pub fn is_complete(&self) -> bool {
        !self.rate.is_empty() && !self.exposure_gwp.is_empty() && !self.egpi.is_empty()
    }

    pub fn contribution(&self) -> f64 {
        parse_amount(&self.rate) * parse_amount(&self.exposure_gwp) * parse_amount(&self.egpi)
    }
}

/// Empty rows for every bucket of [`RATE_YEARS`]
pub fn default_yearly_rates() -> Vec<YearlyRate> {
    RATE_YEARS
        .iter()
        .map(|year| YearlyRate {
            year: year.to_string(),
            ..Default::default()
        })
        .collect()
}

/// Mean of `rate × exposureGWP × egpi` over complete rows, rounded to 2 decimals
///
/// `None` when no row is complete.
pub fn gross_up_factor(rates: &[YearlyRate]) -> Option<f64> {
    let complete: Vec<&YearlyRate> = rates.iter().filter(|r| r.is_complete()).collect();
    if complete.is_empty() {
        return None;
    }
    let sum: f64 = complete.iter().map(|r| r.contribution()).sum();
    Some(round2(sum / complete.len() as f64))
}

/// Tracks the displayed gross-up factor across edits
///
/// Recalculating with no complete row keeps the previous value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrossUpCalculator {
    current: f64,
}

impl Default for GrossUpCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_GROSS_UP_FACTOR)
    }
}

impl GrossUpCalculator {
    pub fn new(initial: f64) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn recalculate(&mut self, rates: &[YearlyRate]) -> f64 {
        if let Some(factor) = gross_up_factor(rates) {
            self.current = factor;
        }
        self.current
    }
}

/// Manual replacement of the calculated factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GrossUpOverride {
    #[validate(
        length(min = 1, message = "value is required"),
        custom(function = "validate_decimal"),
        custom(function = "validate_non_negative")
    )]
    pub value: String,

    #[validate(length(min = 1, message = "comment is required"))]
    pub comment: String,
}

// =============================================================================
// Treaty report and comparison
// =============================================================================

/// `(compare - base) / |base| × 100`, undefined when `base` is zero
pub fn percentage_difference(base: f64, compare: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some((compare - base) / base.abs() * 100.0)
}

/// Aggregates over the exposure files linked to one treaty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatyTotals {
    pub file_count: usize,
    pub policy_count: u64,
    #[serde(rename = "totalGWP", serialize_with = "decimal_string")]
    pub total_gwp: f64,
    #[serde(serialize_with = "decimal_string")]
    pub tsi_amount: f64,
    /// Mean over linked files, `None` without files
    pub matched_companies_percent: Option<f64>,
    pub exposure_by_country: Breakdown,
    pub exposure_by_industry: Breakdown,
    pub currency_distribution: Breakdown,
}

impl TreatyTotals {
    /// Sum the amounts and average the breakdowns, each file weighted equally
    pub fn from_files(files: &[ExposureFile]) -> Result<Self, BlobError> {
        let mut totals = TreatyTotals {
            file_count: files.len(),
            policy_count: 0,
            total_gwp: 0.0,
            tsi_amount: 0.0,
            matched_companies_percent: None,
            exposure_by_country: Breakdown::new(),
            exposure_by_industry: Breakdown::new(),
            currency_distribution: Breakdown::new(),
        };
        if files.is_empty() {
            return Ok(totals);
        }

        let mut matched = 0.0;
        for file in files {
            totals.policy_count += file.count;
            totals.total_gwp += parse_amount(&file.total_gwp);
            totals.tsi_amount += parse_amount(&file.tsi_amount);
            matched += parse_amount(&file.matched_companies_percent);
            accumulate(
                &mut totals.exposure_by_country,
                parse_breakdown(&file.exposure_by_country)?,
            );
            accumulate(
                &mut totals.exposure_by_industry,
                parse_breakdown(&file.exposure_by_industry)?,
            );
            accumulate(
                &mut totals.currency_distribution,
                parse_breakdown(&file.currency_distribution)?,
            );
        }

        let n = files.len() as f64;
        totals.matched_companies_percent = Some(round2(matched / n));
        for breakdown in [
            &mut totals.exposure_by_country,
            &mut totals.exposure_by_industry,
            &mut totals.currency_distribution,
        ] {
            breakdown.values_mut().for_each(|v| *v = round2(*v / n));
        }

        Ok(totals)
    }
}

fn accumulate(into: &mut Breakdown, from: Breakdown) {
    for (key, value) in from {
        *into.entry(key).or_insert(0.0) += value;
    }
}

/// Single-treaty report: the contract, its linked files and their totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatyReport {
    pub contract: Contract,
    pub exposure_files: Vec<ExposureFile>,
    pub totals: TreatyTotals,
}

impl TreatyReport {
    pub fn build(contract: Contract, exposure_files: Vec<ExposureFile>) -> Result<Self, BlobError> {
        let totals = TreatyTotals::from_files(&exposure_files)?;
        Ok(Self {
            contract,
            exposure_files,
            totals,
        })
    }
}

/// A metric measured on both treaties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub left: f64,
    pub right: f64,
    pub difference: f64,
    pub percentage_difference: Option<f64>,
}

impl MetricComparison {
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left,
            right,
            difference: round2(right - left),
            percentage_difference: percentage_difference(left, right).map(round2),
        }
    }
}

/// A breakdown key compared across both treaties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownComparison {
    pub key: String,
    #[serde(flatten)]
    pub metric: MetricComparison,
}

/// Compare two breakdowns over the union of their keys, missing keys as 0
pub fn compare_breakdowns(left: &Breakdown, right: &Breakdown) -> Vec<BreakdownComparison> {
    let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    keys.into_iter()
        .map(|key| BreakdownComparison {
            key: key.clone(),
            metric: MetricComparison::new(
                left.get(key).copied().unwrap_or(0.0),
                right.get(key).copied().unwrap_or(0.0),
            ),
        })
        .collect()
}

/// Contract and totals of one side of a comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatySide {
    pub contract: Contract,
    pub totals: TreatyTotals,
}

/// Two-treaty comparison; differences are `right - left`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatyComparison {
    pub left: TreatySide,
    pub right: TreatySide,
    #[serde(rename = "totalGWP")]
    pub total_gwp: MetricComparison,
    pub tsi_amount: MetricComparison,
    pub policy_count: MetricComparison,
    pub matched_companies_percent: MetricComparison,
    pub exposure_by_country: Vec<BreakdownComparison>,
    pub exposure_by_industry: Vec<BreakdownComparison>,
    pub currency_distribution: Vec<BreakdownComparison>,
}

impl TreatyComparison {
    pub fn between(left: TreatyReport, right: TreatyReport) -> Self {
        let (l, r) = (&left.totals, &right.totals);
        let total_gwp = MetricComparison::new(round2(l.total_gwp), round2(r.total_gwp));
        let tsi_amount = MetricComparison::new(round2(l.tsi_amount), round2(r.tsi_amount));
        let policy_count = MetricComparison::new(l.policy_count as f64, r.policy_count as f64);
        let matched_companies_percent = MetricComparison::new(
            l.matched_companies_percent.unwrap_or(0.0),
            r.matched_companies_percent.unwrap_or(0.0),
        );
        let exposure_by_country =
            compare_breakdowns(&l.exposure_by_country, &r.exposure_by_country);
        let exposure_by_industry =
            compare_breakdowns(&l.exposure_by_industry, &r.exposure_by_industry);
        let currency_distribution =
            compare_breakdowns(&l.currency_distribution, &r.currency_distribution);

        Self {
            left: TreatySide {
                contract: left.contract,
                totals: left.totals,
            },
            right: TreatySide {
                contract: right.contract,
                totals: right.totals,
            },
            total_gwp,
            tsi_amount,
            policy_count,
            matched_companies_percent,
            exposure_by_country,
            exposure_by_industry,
            currency_distribution,
        }
    }
}
