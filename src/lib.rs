//! # treaty-links
//!
//! REST service linking reinsurance contracts (treaties) to uploaded
//! exposure files, with exposure analytics and treaty comparison.
//!
//! ## Layout
//!
//! - [`core`]: entities, the [`LinkStore`](core::LinkStore) trait, errors,
//!   validation and the pure analytics
//! - [`storage`]: the in-memory store and the sample dataset
//! - [`entities`], [`links`], [`reports`]: HTTP handlers
//! - [`server`]: `ServerBuilder` and the REST exposure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use treaty_links::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_yaml_file("config/treaty-links.yaml")?;
//!     ServerBuilder::from_config(config).await?.serve().await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod reports;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        analytics::{
            ExposureOverview, GrossUpCalculator, GrossUpOverride, TreatyComparison, TreatyReport,
            TreatyTotals, YearlyRate, percentage_difference,
        },
        entity::{Contract, EntityId, ExposureFile, NewContract, NewExposureFile, TopCompany},
        error::{EntityError, LinkError, TreatyError, TreatyResult},
        link::{ContractExposureLink, LinkIntegrity, NewLink},
        service::LinkStore,
        validation::Validated,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryLinkStore, seed_sample_data};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
}
