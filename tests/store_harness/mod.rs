//! Shared test harness for `LinkStore` implementations
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod link_store_tests;

use chrono::NaiveDate;
use treaty_links::core::entity::{Contract, ExposureFile, NewContract, NewExposureFile};
use treaty_links::core::service::LinkStore;

pub fn new_contract(number: &str, name: &str) -> NewContract {
    NewContract::new(
        number,
        name,
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
    )
}

pub fn new_exposure_file(file_id: &str) -> NewExposureFile {
    let mut file = NewExposureFile::new(file_id, "tester", "1000.00", "250000.00");
    file.count = 10;
    file.exposure_by_country = r#"{"US": 60, "UK": 40}"#.to_string();
    file
}

/// Insert `contracts` contracts and `files` exposure files, ids 1..=n
pub async fn populate(
    store: &dyn LinkStore,
    contracts: usize,
    files: usize,
) -> (Vec<Contract>, Vec<ExposureFile>) {
    let mut created_contracts = Vec::new();
    for i in 1..=contracts {
        created_contracts.push(
            store
                .create_contract(new_contract(&format!("CNT-{}", i), &format!("Contract {}", i)))
                .await
                .expect("create contract"),
        );
    }

    let mut created_files = Vec::new();
    for i in 1..=files {
        created_files.push(
            store
                .create_exposure_file(new_exposure_file(&format!("F{:04}", i)))
                .await
                .expect("create exposure file"),
        );
    }

    (created_contracts, created_files)
}
