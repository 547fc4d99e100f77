//! Repository trait for contracts, exposure files and their links

use crate::core::entity::{Contract, EntityId, ExposureFile, NewContract, NewExposureFile};
use crate::core::error::TreatyResult;
use crate::core::link::{ContractExposureLink, NewLink};
use async_trait::async_trait;

/// The link store capability set
///
/// The HTTP layer only ever talks to a `dyn LinkStore`, so a database-backed
/// implementation can replace [`InMemoryLinkStore`](crate::storage::InMemoryLinkStore)
/// without touching the handlers.
///
/// Lists are returned in insertion order.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// List all contracts
    async fn list_contracts(&self) -> TreatyResult<Vec<Contract>>;

    /// Get a contract by id
    async fn get_contract(&self, id: EntityId) -> TreatyResult<Option<Contract>>;

    /// Insert a contract and assign its id
    async fn create_contract(&self, contract: NewContract) -> TreatyResult<Contract>;

    /// List all exposure files
    async fn list_exposure_files(&self) -> TreatyResult<Vec<ExposureFile>>;

    /// Get an exposure file by id
    async fn get_exposure_file(&self, id: EntityId) -> TreatyResult<Option<ExposureFile>>;

    /// Insert an exposure file and assign its id
    async fn create_exposure_file(&self, file: NewExposureFile) -> TreatyResult<ExposureFile>;

    /// Links whose `contract_id` matches
    ///
    /// An unknown contract id yields an empty list, not an error.
    async fn list_links_for_contract(
        &self,
        contract_id: EntityId,
    ) -> TreatyResult<Vec<ContractExposureLink>>;

    /// Create a link
    ///
    /// Whether dangling ids and duplicate pairs are accepted depends on the
    /// store's [`LinkIntegrity`](crate::core::link::LinkIntegrity).
    async fn create_link(&self, link: NewLink) -> TreatyResult<ContractExposureLink>;

    /// Remove the oldest link matching the pair
    ///
    /// Returns the removed link, or `None` when nothing matched.
    async fn delete_link(
        &self,
        contract_id: EntityId,
        exposure_file_id: EntityId,
    ) -> TreatyResult<Option<ContractExposureLink>>;
}
