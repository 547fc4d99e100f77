//! Field validators used by `#[validate(custom(...))]` attributes

use crate::core::analytics::{parse_breakdown, parse_records, parse_top_companies};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("decimal pattern is valid"));

/// Decimal number encoded as a string, e.g. `"1250000.50"`
pub fn validate_decimal(value: &str) -> Result<(), ValidationError> {
    if DECIMAL.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("decimal")
            .with_message(Cow::Owned(format!("'{}' is not a decimal number", value))))
    }
}

/// Decimal string between 0 and 100 inclusive
pub fn validate_percentage(value: &str) -> Result<(), ValidationError> {
    validate_decimal(value)?;
    match value.parse::<f64>() {
        Ok(pct) if (0.0..=100.0).contains(&pct) => Ok(()),
        _ => Err(ValidationError::new("percentage")
            .with_message(Cow::Borrowed("must be between 0 and 100"))),
    }
}

/// Decimal string that does not start with a minus sign
pub fn validate_non_negative(value: &str) -> Result<(), ValidationError> {
    if value.starts_with('-') {
        Err(ValidationError::new("non_negative")
            .with_message(Cow::Borrowed("must not be negative")))
    } else {
        Ok(())
    }
}

/// Non-blank text without leading or trailing whitespace
pub fn validate_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")))
    } else if value.trim() != value {
        Err(ValidationError::new("padded")
            .with_message(Cow::Borrowed("must not start or end with whitespace")))
    } else {
        Ok(())
    }
}

/// JSON object mapping labels to numbers
pub fn validate_breakdown_blob(value: &str) -> Result<(), ValidationError> {
    parse_breakdown(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("breakdown").with_message(Cow::Owned(e.to_string())))
}

/// JSON array of records
pub fn validate_records_blob(value: &str) -> Result<(), ValidationError> {
    parse_records(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("records").with_message(Cow::Owned(e.to_string())))
}

/// JSON array of `{name, sumInsured}` records
pub fn validate_top_companies_blob(value: &str) -> Result<(), ValidationError> {
    parse_top_companies(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("top_companies").with_message(Cow::Owned(e.to_string())))
}
