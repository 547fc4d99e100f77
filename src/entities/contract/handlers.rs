//! Contract HTTP handlers

use crate::core::entity::{Contract, EntityId, NewContract};
use crate::core::error::{EntityError, TreatyResult};
use crate::core::query::ContractQuery;
use crate::core::service::LinkStore;
use crate::core::validation::{Validated, parse_entity_id};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// Contract-specific AppState
#[derive(Clone)]
pub struct ContractAppState {
    pub store: Arc<dyn LinkStore>,
}

/// Load a contract or fail with 404
pub async fn fetch_contract(store: &dyn LinkStore, id: EntityId) -> TreatyResult<Contract> {
    store
        .get_contract(id)
        .await?
        .ok_or_else(|| EntityError::not_found(Contract::ENTITY_TYPE, id).into())
}

pub async fn list_contracts(
    State(state): State<ContractAppState>,
    Query(query): Query<ContractQuery>,
) -> TreatyResult<Json<Vec<Contract>>> {
    let contracts = query.apply(state.store.list_contracts().await?);
    tracing::debug!(count = contracts.len(), search = ?query.search, "listing contracts");
    Ok(Json(contracts))
}

pub async fn get_contract(
    State(state): State<ContractAppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<Contract>> {
    let id = parse_entity_id(&id)?;
    fetch_contract(state.store.as_ref(), id).await.map(Json)
}

pub async fn create_contract(
    State(state): State<ContractAppState>,
    Validated(payload): Validated<NewContract>,
) -> TreatyResult<(StatusCode, Json<Contract>)> {
    let contract = state.store.create_contract(payload).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}
