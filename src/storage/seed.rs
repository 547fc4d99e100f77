//! Sample dataset loaded at startup when `store.seed_sample_data` is set

use crate::core::analytics::rank_top_companies;
use crate::core::entity::{NewContract, NewExposureFile, TopCompany};
use crate::core::error::TreatyResult;
use crate::core::link::NewLink;
use crate::core::service::LinkStore;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

struct SampleFile {
    file_id: &'static str,
    imported_by: &'static str,
    imported_on: (i32, u32, u32),
    count: u64,
    total_gwp: &'static str,
    tsi_amount: &'static str,
    matched: &'static str,
    country: serde_json::Value,
    industry: serde_json::Value,
    currency: serde_json::Value,
    companies: &'static [(&'static str, f64)],
}

fn sample_files() -> Vec<SampleFile> {
    vec![
        SampleFile {
            file_id: "803837",
            imported_by: "j.smith",
            imported_on: (2024, 3, 12),
            count: 1250,
            total_gwp: "4525000.00",
            tsi_amount: "1850000000.00",
            matched: "87.5",
            country: json!({
                "United States": 45.2,
                "United Kingdom": 22.1,
                "Germany": 15.4,
                "France": 10.3,
                "Japan": 7.0
            }),
            industry: json!({
                "Manufacturing": 35.0,
                "Retail": 25.5,
                "Technology": 20.0,
                "Healthcare": 19.5
            }),
            currency: json!({"USD": 52.0, "GBP": 23.0, "EUR": 25.0}),
            companies: &[
                ("Acme Industrial", 125_000_000.0),
                ("Northwind Logistics", 98_500_000.0),
                ("Globex Retail", 87_250_000.0),
                ("Initech Systems", 64_000_000.0),
            ],
        },
        SampleFile {
            file_id: "890283",
            imported_by: "a.jones",
            imported_on: (2024, 5, 2),
            count: 860,
            total_gwp: "2980000.50",
            tsi_amount: "1120000000.00",
            matched: "92.3",
            country: json!({"United States": 60.0, "Canada": 25.0, "Mexico": 15.0}),
            industry: json!({"Energy": 40.0, "Manufacturing": 30.0, "Transport": 30.0}),
            currency: json!({"USD": 75.0, "CAD": 25.0}),
            companies: &[
                ("Umbrella Energy", 142_000_000.0),
                ("Stark Freight", 71_300_000.0),
                ("Wayne Manufacturing", 69_900_000.0),
            ],
        },
        SampleFile {
            file_id: "756432",
            imported_by: "j.smith",
            imported_on: (2023, 11, 20),
            count: 410,
            total_gwp: "1275000.00",
            tsi_amount: "540000000.00",
            matched: "78.9",
            country: json!({"Germany": 50.0, "France": 30.0, "Italy": 20.0}),
            industry: json!({"Technology": 55.0, "Financial Services": 45.0}),
            currency: json!({"EUR": 100.0}),
            companies: &[
                ("Hooli Europe", 48_000_000.0),
                ("Vandelay Imports", 39_500_000.0),
            ],
        },
    ]
}

/// Insert three contracts, three exposure files and two links
///
/// The first seeded contract is linked to the first two seeded files,
/// whatever ids the store assigns them.
pub async fn seed_sample_data(store: &dyn LinkStore) -> TreatyResult<()> {
    let mut contracts = Vec::new();
    for (number, name, (y, m, d)) in [
        ("CNT-2024-001", "Contract 1", (2024, 1, 1)),
        ("CNT-2024-002", "Contract 2", (2024, 4, 1)),
        ("CNT-2025-003", "Contract 3", (2025, 1, 1)),
    ] {
        let inception = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let contract = store
            .create_contract(NewContract::new(number, name, inception))
            .await?;
        contracts.push(contract.id);
    }

    let mut files = Vec::new();
    for sample in sample_files() {
        let file = store.create_exposure_file(sample.into_new_file()).await?;
        files.push(file.id);
    }

    if let Some(&contract_id) = contracts.first() {
        for &file_id in files.iter().take(2) {
            store.create_link(NewLink::new(contract_id, file_id)).await?;
        }
    }

    tracing::info!(
        contracts = contracts.len(),
        exposure_files = files.len(),
        "sample data loaded"
    );
    Ok(())
}

impl SampleFile {
    fn into_new_file(self) -> NewExposureFile {
        let companies = rank_top_companies(
            self.companies
                .iter()
                .map(|(name, sum_insured)| TopCompany {
                    name: name.to_string(),
                    sum_insured: *sum_insured,
                })
                .collect(),
        );
        let detailed: Vec<serde_json::Value> = companies
            .iter()
            .map(|c| json!({"insured": c.name, "sumInsured": c.sum_insured}))
            .collect();
        let (y, m, d) = self.imported_on;

        let mut file =
            NewExposureFile::new(self.file_id, self.imported_by, self.total_gwp, self.tsi_amount);
        file.imported_at = Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).single();
        file.count = self.count;
        file.matched_companies_percent = self.matched.to_string();
        file.exposure_by_country = self.country.to_string();
        file.exposure_by_industry = self.industry.to_string();
        file.currency_distribution = self.currency.to_string();
        file.top_companies = json!(companies).to_string();
        file.detailed_data = json!(detailed).to_string();
        file
    }
}
