//! ExposureFile HTTP handlers

use crate::core::analytics::ExposureOverview;
use crate::core::entity::{EntityId, ExposureFile, NewExposureFile};
use crate::core::error::{EntityError, TreatyResult};
use crate::core::service::LinkStore;
use crate::core::validation::{Validated, parse_entity_id};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// ExposureFile-specific AppState
#[derive(Clone)]
pub struct ExposureFileAppState {
    pub store: Arc<dyn LinkStore>,
}

async fn fetch_exposure_file(store: &dyn LinkStore, id: EntityId) -> TreatyResult<ExposureFile> {
    store
        .get_exposure_file(id)
        .await?
        .ok_or_else(|| EntityError::not_found(ExposureFile::ENTITY_TYPE, id).into())
}

pub async fn list_exposure_files(
    State(state): State<ExposureFileAppState>,
) -> TreatyResult<Json<Vec<ExposureFile>>> {
    let files = state.store.list_exposure_files().await?;
    tracing::debug!(count = files.len(), "listing exposure files");
    Ok(Json(files))
}

pub async fn get_exposure_file(
    State(state): State<ExposureFileAppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<ExposureFile>> {
    let id = parse_entity_id(&id)?;
    fetch_exposure_file(state.store.as_ref(), id).await.map(Json)
}

pub async fn create_exposure_file(
    State(state): State<ExposureFileAppState>,
    Validated(payload): Validated<NewExposureFile>,
) -> TreatyResult<(StatusCode, Json<ExposureFile>)> {
    let file = state.store.create_exposure_file(payload).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// Parsed breakdowns and ranked top companies of one file
pub async fn get_exposure_overview(
    State(state): State<ExposureFileAppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<ExposureOverview>> {
    let id = parse_entity_id(&id)?;
    let file = fetch_exposure_file(state.store.as_ref(), id).await?;
    Ok(Json(ExposureOverview::from_file(&file)?))
}
