//! HTTP handlers for contract ↔ exposure file links
//!
//! Listing links and deleting them never fail on unknown ids: an unknown
//! contract simply has no links, and deleting a missing pair is a no-op.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use validator::Validate;

use crate::core::entity::{EntityId, ExposureFile};
use crate::core::error::TreatyResult;
use crate::core::link::{ContractExposureLink, NewLink};
use crate::core::service::LinkStore;
use crate::core::validation::{Sanitize, Validated, parse_entity_id};
use crate::entities::contract::fetch_contract;

/// Application state shared across link handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
}

/// Body of `POST /contracts/{id}/links`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub exposure_file_id: EntityId,
}

impl Sanitize for CreateLinkRequest {}

/// Exposure files linked to a contract, in link order
///
/// Links pointing at unknown files are skipped and a file linked twice is
/// returned once.
pub async fn linked_exposure_files(
    store: &dyn LinkStore,
    contract_id: EntityId,
) -> TreatyResult<Vec<ExposureFile>> {
    let links = store.list_links_for_contract(contract_id).await?;
    let mut seen = HashSet::new();
    let mut files = Vec::with_capacity(links.len());

    for link in links {
        if !seen.insert(link.exposure_file_id) {
            continue;
        }
        match store.get_exposure_file(link.exposure_file_id).await? {
            Some(file) => files.push(file),
            None => tracing::debug!(
                link_id = link.id,
                exposure_file_id = link.exposure_file_id,
                "skipping dangling link"
            ),
        }
    }

    Ok(files)
}

/// List the links of a contract
///
/// GET /contracts/{id}/links
pub async fn list_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<Vec<ContractExposureLink>>> {
    let contract_id = parse_entity_id(&id)?;
    let links = state.store.list_links_for_contract(contract_id).await?;
    tracing::debug!(contract_id, count = links.len(), "listing links");
    Ok(Json(links))
}

/// Link an exposure file to a contract
///
/// POST /contracts/{id}/links
pub async fn create_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(payload): Validated<CreateLinkRequest>,
) -> TreatyResult<(StatusCode, Json<ContractExposureLink>)> {
    let contract_id = parse_entity_id(&id)?;
    let link = state
        .store
        .create_link(NewLink::new(contract_id, payload.exposure_file_id))
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Unlink an exposure file from a contract
///
/// DELETE /contracts/{id}/links/{exposure_file_id}
pub async fn delete_link(
    State(state): State<AppState>,
    Path((id, exposure_file_id)): Path<(String, String)>,
) -> TreatyResult<StatusCode> {
    let contract_id = parse_entity_id(&id)?;
    let exposure_file_id = parse_entity_id(&exposure_file_id)?;
    state
        .store
        .delete_link(contract_id, exposure_file_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolved exposure files of a contract
///
/// GET /contracts/{id}/exposure-files
pub async fn list_linked_exposure_files(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<Vec<ExposureFile>>> {
    let contract_id = parse_entity_id(&id)?;
    fetch_contract(state.store.as_ref(), contract_id).await?;
    let files = linked_exposure_files(state.store.as_ref(), contract_id).await?;
    Ok(Json(files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::NewExposureFile;
    use crate::storage::InMemoryLinkStore;

    #[tokio::test]
    async fn test_linked_files_skip_dangling_and_duplicates() {
        let store = InMemoryLinkStore::new();
        store
            .create_exposure_file(NewExposureFile::new("803837", "ops", "1", "1"))
            .await
            .unwrap();
        for file_id in [1, 42, 1] {
            store.create_link(NewLink::new(1, file_id)).await.unwrap();
        }

        let files = linked_exposure_files(&store, 1).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_id, "803837");
    }

    #[test]
    fn test_create_link_request_wire_name() {
        let req: CreateLinkRequest =
            serde_json::from_value(serde_json::json!({"exposureFileId": 3})).unwrap();
        assert_eq!(req.exposure_file_id, 3);
        assert!(serde_json::from_value::<CreateLinkRequest>(serde_json::json!({})).is_err());
    }
}
