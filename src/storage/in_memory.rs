//! In-memory implementation of LinkStore
//!
//! All three collections sit behind a single `RwLock`, so every operation
//! sees and leaves a consistent snapshot. Collections are `IndexMap`s keyed
//! by id, which keeps listing in insertion order.

use crate::core::entity::{Contract, EntityId, ExposureFile, NewContract, NewExposureFile};
use crate::core::error::{EntityError, LinkError, StorageError, TreatyResult};
use crate::core::link::{ContractExposureLink, LinkIntegrity, NewLink};
use crate::core::service::LinkStore;
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Monotonic id counter for one collection, starting at 1
#[derive(Debug, Default)]
struct IdSequence {
    last: EntityId,
}

impl IdSequence {
    fn next(&mut self) -> EntityId {
        self.last += 1;
        self.last
    }
}

#[derive(Debug, Default)]
struct Collections {
    contracts: IndexMap<EntityId, Contract>,
    exposure_files: IndexMap<EntityId, ExposureFile>,
    links: IndexMap<EntityId, ContractExposureLink>,
    contract_ids: IdSequence,
    exposure_file_ids: IdSequence,
    link_ids: IdSequence,
}

impl Collections {
    /// Reject dangling references and duplicate pairs
    fn check_link(&self, link: &NewLink) -> TreatyResult<()> {
        if !self.contracts.contains_key(&link.contract_id) {
            return Err(EntityError::not_found(Contract::ENTITY_TYPE, link.contract_id).into());
        }
        if !self.exposure_files.contains_key(&link.exposure_file_id) {
            return Err(
                EntityError::not_found(ExposureFile::ENTITY_TYPE, link.exposure_file_id).into(),
            );
        }
        if self
            .links
            .values()
            .any(|l| l.connects(link.contract_id, link.exposure_file_id))
        {
            return Err(LinkError::AlreadyExists {
                contract_id: link.contract_id,
                exposure_file_id: link.exposure_file_id,
            }
            .into());
        }
        Ok(())
    }
}

/// In-memory link store
///
/// Cloning is cheap and every clone shares the same data.
#[derive(Clone, Default)]
pub struct InMemoryLinkStore {
    inner: Arc<RwLock<Collections>>,
    integrity: LinkIntegrity,
}

impl InMemoryLinkStore {
    /// Create an empty store in permissive mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given link integrity mode
    pub fn with_integrity(integrity: LinkIntegrity) -> Self {
        Self {
            inner: Arc::default(),
            integrity,
        }
    }

    pub fn integrity(&self) -> LinkIntegrity {
        self.integrity
    }

    fn read(&self) -> TreatyResult<RwLockReadGuard<'_, Collections>> {
        self.inner.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> TreatyResult<RwLockWriteGuard<'_, Collections>> {
        self.inner.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn list_contracts(&self) -> TreatyResult<Vec<Contract>> {
        Ok(self.read()?.contracts.values().cloned().collect())
    }

    async fn get_contract(&self, id: EntityId) -> TreatyResult<Option<Contract>> {
        Ok(self.read()?.contracts.get(&id).cloned())
    }

    async fn create_contract(&self, contract: NewContract) -> TreatyResult<Contract> {
        let mut data = self.write()?;
        let id = data.contract_ids.next();
        let contract = contract.into_contract(id);
        data.contracts.insert(id, contract.clone());
        tracing::info!(id, contract_number = %contract.contract_number, "contract created");
        Ok(contract)
    }

    async fn list_exposure_files(&self) -> TreatyResult<Vec<ExposureFile>> {
        Ok(self.read()?.exposure_files.values().cloned().collect())
    }

    async fn get_exposure_file(&self, id: EntityId) -> TreatyResult<Option<ExposureFile>> {
        Ok(self.read()?.exposure_files.get(&id).cloned())
    }

    async fn create_exposure_file(&self, file: NewExposureFile) -> TreatyResult<ExposureFile> {
        let mut data = self.write()?;
        let id = data.exposure_file_ids.next();
        let file = file.into_exposure_file(id, Utc::now());
        data.exposure_files.insert(id, file.clone());
        tracing::info!(id, file_id = %file.file_id, "exposure file created");
        Ok(file)
    }

    async fn list_links_for_contract(
        &self,
        contract_id: EntityId,
    ) -> TreatyResult<Vec<ContractExposureLink>> {
        Ok(self
            .read()?
            .links
            .values()
            .filter(|link| link.contract_id == contract_id)
            .cloned()
            .collect())
    }

    async fn create_link(&self, link: NewLink) -> TreatyResult<ContractExposureLink> {
        let mut data = self.write()?;
        if self.integrity == LinkIntegrity::Strict {
            data.check_link(&link)?;
        }
        let id = data.link_ids.next();
        let link = link.into_link(id);
        data.links.insert(id, link.clone());
        tracing::info!(
            id,
            contract_id = link.contract_id,
            exposure_file_id = link.exposure_file_id,
            "link created"
        );
        Ok(link)
    }

    async fn delete_link(
        &self,
        contract_id: EntityId,
        exposure_file_id: EntityId,
    ) -> TreatyResult<Option<ContractExposureLink>> {
        let mut data = self.write()?;
        let Some(index) = data
            .links
            .values()
            .position(|l| l.connects(contract_id, exposure_file_id))
        else {
            tracing::debug!(contract_id, exposure_file_id, "no link to delete");
            return Ok(None);
        };

        let removed = data.links.shift_remove_index(index).map(|(_, link)| link);
        if let Some(link) = &removed {
            tracing::info!(id = link.id, contract_id, exposure_file_id, "link deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TreatyError;
    use chrono::NaiveDate;

    fn new_contract(number: &str) -> NewContract {
        NewContract::new(number, "Treaty", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[tokio::test]
    async fn test_ids_are_per_collection_and_start_at_one() {
        let store = InMemoryLinkStore::new();

        let c1 = store.create_contract(new_contract("CNT-1")).await.unwrap();
        let c2 = store.create_contract(new_contract("CNT-2")).await.unwrap();
        let f1 = store
            .create_exposure_file(NewExposureFile::new("F1", "ops", "1", "2"))
            .await
            .unwrap();
        let l1 = store.create_link(NewLink::new(9, 9)).await.unwrap();

        assert_eq!((c1.id, c2.id, f1.id, l1.id), (1, 2, 1, 1));
    }

    #[tokio::test]
    async fn test_link_ids_never_reused() {
        let store = InMemoryLinkStore::new();
        let first = store.create_link(NewLink::new(1, 1)).await.unwrap();
        store.delete_link(1, 1).await.unwrap();
        let second = store.create_link(NewLink::new(1, 1)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_delete_removes_oldest_duplicate() {
        let store = InMemoryLinkStore::new();
        let oldest = store.create_link(NewLink::new(1, 2)).await.unwrap();
        let newest = store.create_link(NewLink::new(1, 2)).await.unwrap();

        let removed = store.delete_link(1, 2).await.unwrap();
        assert_eq!(removed, Some(oldest));

        let remaining = store.list_links_for_contract(1).await.unwrap();
        assert_eq!(remaining, vec![newest]);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_remaining_links() {
        let store = InMemoryLinkStore::new();
        for file in 1..=3 {
            store.create_link(NewLink::new(1, file)).await.unwrap();
        }
        store.delete_link(1, 2).await.unwrap();

        let files: Vec<EntityId> = store
            .list_links_for_contract(1)
            .await
            .unwrap()
            .iter()
            .map(|l| l.exposure_file_id)
            .collect();
        assert_eq!(files, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_dangling_and_duplicate_links() {
        let store = InMemoryLinkStore::with_integrity(LinkIntegrity::Strict);
        store.create_contract(new_contract("CNT-1")).await.unwrap();
        store
            .create_exposure_file(NewExposureFile::new("F1", "ops", "1", "2"))
            .await
            .unwrap();

        let missing_file = store.create_link(NewLink::new(1, 7)).await.unwrap_err();
        assert!(matches!(
            missing_file,
            TreatyError::Entity(EntityError::NotFound {
                entity_type: "exposure_file",
                id: 7
            })
        ));

        let missing_contract = store.create_link(NewLink::new(3, 1)).await.unwrap_err();
        assert_eq!(missing_contract.status_code(), axum::http::StatusCode::NOT_FOUND);

        store.create_link(NewLink::new(1, 1)).await.unwrap();
        let duplicate = store.create_link(NewLink::new(1, 1)).await.unwrap_err();
        assert!(matches!(duplicate, TreatyError::Link(LinkError::AlreadyExists { .. })));

        // rejected attempts must not consume ids
        store.delete_link(1, 1).await.unwrap();
        let next = store.create_link(NewLink::new(1, 1)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryLinkStore::new();
        let clone = store.clone();
        clone.create_contract(new_contract("CNT-1")).await.unwrap();

        assert_eq!(store.list_contracts().await.unwrap().len(), 1);
    }
}
