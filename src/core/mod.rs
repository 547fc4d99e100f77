//! Domain types, the store trait and the pure analytics

pub mod analytics;
pub mod entity;
pub mod error;
pub mod link;
pub mod query;
pub mod service;
pub mod validation;

pub use entity::{Contract, EntityId, ExposureFile, NewContract, NewExposureFile, TopCompany};
pub use error::{TreatyError, TreatyResult};
pub use link::{ContractExposureLink, LinkIntegrity, NewLink};
pub use service::LinkStore;
