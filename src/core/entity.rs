//! Contract and exposure file entities
//!
//! Both entity types are insert-only: the store assigns the id on creation
//! and never mutates or deletes them afterwards.

use crate::core::validation::validators::{
    validate_breakdown_blob, validate_decimal, validate_percentage, validate_records_blob,
    validate_top_companies_blob, validate_trimmed,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use validator::Validate;

/// Identifier assigned by the store, unique per collection and starting at 1
pub type EntityId = u64;

/// An underwriting agreement (treaty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: EntityId,
    pub contract_number: String,
    pub name: String,
    pub inception_date: NaiveDate,
}

impl Contract {
    pub const ENTITY_TYPE: &'static str = "contract";
}

/// Insert payload for a [`Contract`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContract {
    #[validate(
        length(min = 1, max = 64, message = "must be 1 to 64 characters"),
        custom(function = "validate_trimmed")
    )]
    pub contract_number: String,

    #[validate(
        length(min = 1, max = 200, message = "must be 1 to 200 characters"),
        custom(function = "validate_trimmed")
    )]
    pub name: String,

    pub inception_date: NaiveDate,
}

impl NewContract {
    pub fn new(
        contract_number: impl Into<String>,
        name: impl Into<String>,
        inception_date: NaiveDate,
    ) -> Self {
        Self {
            contract_number: contract_number.into(),
            name: name.into(),
            inception_date,
        }
    }

    /// Attach the id assigned by the store
    pub fn into_contract(self, id: EntityId) -> Contract {
        Contract {
            id,
            contract_number: self.contract_number,
            name: self.name,
            inception_date: self.inception_date,
        }
    }
}

/// An uploaded snapshot of insured-risk data
///
/// The breakdown maps and company lists are kept as the JSON strings they
/// were uploaded as; see [`crate::core::analytics`] for the parsed views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureFile {
    pub id: EntityId,
    pub file_id: String,
    pub imported_by: String,
    pub imported_at: DateTime<Utc>,
    pub count: u64,
    #[serde(rename = "totalGWP")]
    pub total_gwp: String,
    pub tsi_amount: String,
    pub exposure_by_country: String,
    pub exposure_by_industry: String,
    pub currency_distribution: String,
    pub matched_companies_percent: String,
    pub top_companies: String,
    pub detailed_data: String,
}

impl ExposureFile {
    pub const ENTITY_TYPE: &'static str = "exposure_file";
}

/// Insert payload for an [`ExposureFile`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExposureFile {
    #[validate(
        length(min = 1, max = 64, message = "must be 1 to 64 characters"),
        custom(function = "validate_trimmed")
    )]
    pub file_id: String,

    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = "validate_trimmed")
    )]
    pub imported_by: String,

    /// Defaults to the insertion time when omitted
    #[serde(default)]
    pub imported_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub count: u64,

    #[serde(rename = "totalGWP")]
    #[validate(custom(function = "validate_decimal"))]
    pub total_gwp: String,

    #[validate(custom(function = "validate_decimal"))]
    pub tsi_amount: String,

    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_breakdown_blob"))]
    pub exposure_by_country: String,

    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_breakdown_blob"))]
    pub exposure_by_industry: String,

    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_breakdown_blob"))]
    pub currency_distribution: String,

    #[serde(default = "zero")]
    #[validate(custom(function = "validate_percentage"))]
    pub matched_companies_percent: String,

    #[serde(default = "empty_array")]
    #[validate(custom(function = "validate_top_companies_blob"))]
    pub top_companies: String,

    #[serde(default = "empty_array")]
    #[validate(custom(function = "validate_records_blob"))]
    pub detailed_data: String,
}

fn empty_object() -> String {
    "{}".to_string()
}

fn empty_array() -> String {
    "[]".to_string()
}

fn zero() -> String {
    "0".to_string()
}

impl NewExposureFile {
    /// Minimal payload with empty breakdowns, mostly useful in tests
    pub fn new(
        file_id: impl Into<String>,
        imported_by: impl Into<String>,
        total_gwp: impl Into<String>,
        tsi_amount: impl Into<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            imported_by: imported_by.into(),
            imported_at: None,
            count: 0,
            total_gwp: total_gwp.into(),
            tsi_amount: tsi_amount.into(),
            exposure_by_country: empty_object(),
            exposure_by_industry: empty_object(),
            currency_distribution: empty_object(),
            matched_companies_percent: zero(),
            top_companies: empty_array(),
            detailed_data: empty_array(),
        }
    }

    /// Attach the id assigned by the store
    pub fn into_exposure_file(self, id: EntityId, now: DateTime<Utc>) -> ExposureFile {
        ExposureFile {
            id,
            file_id: self.file_id,
            imported_by: self.imported_by,
            imported_at: self.imported_at.unwrap_or(now),
            count: self.count,
            total_gwp: self.total_gwp,
            tsi_amount: self.tsi_amount,
            exposure_by_country: self.exposure_by_country,
            exposure_by_industry: self.exposure_by_industry,
            currency_distribution: self.currency_distribution,
            matched_companies_percent: self.matched_companies_percent,
            top_companies: self.top_companies,
            detailed_data: self.detailed_data,
        }
    }
}

/// One entry of an exposure file's `topCompanies` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCompany {
    pub name: String,
    #[serde(deserialize_with = "number_or_decimal_string")]
    pub sum_insured: f64,
}

/// Accept `5000`, `5000.5` or `"5000.50"`
fn number_or_decimal_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| de::Error::custom(format!("'{}' is not a decimal number", raw))),
    }
}
