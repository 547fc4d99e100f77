//! Normalization applied to payloads before validation
//!
//! Stored entities are echoed back exactly as they were posted, so their
//! payloads pass through untouched and padding is rejected by the
//! validators instead. Only transient inputs such as calculator rows are
//! cleaned up here.

use crate::core::entity::{NewContract, NewExposureFile};

/// Clean up user input before it is validated
pub trait Sanitize {
    fn sanitize(&mut self) {}
}

impl Sanitize for NewContract {}

impl Sanitize for NewExposureFile {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_contract_payload_is_left_as_posted() {
        let mut contract = NewContract::new(
            "cnt-7",
            "Property Cat XL",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        let posted = contract.clone();
        contract.sanitize();
        assert_eq!(contract, posted);
    }

    #[test]
    fn test_exposure_payload_is_left_as_posted() {
        let mut file = NewExposureFile::new("803837", "ops", "10.5", "20");
        let posted = file.clone();
        file.sanitize();
        assert_eq!(file, posted);
    }
}
