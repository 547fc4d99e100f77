//! Router builder utilities for link routes

use crate::links::handlers::{
    AppState, create_link, delete_link, list_linked_exposure_files, list_links,
};
use axum::{
    Router,
    routing::{delete, get},
};

/// Build link routes, relative to the API prefix
///
/// - GET /contracts/{id}/links - List the links of a contract
/// - POST /contracts/{id}/links - Link an exposure file
/// - DELETE /contracts/{id}/links/{exposure_file_id} - Unlink an exposure file
/// - GET /contracts/{id}/exposure-files - Resolved linked exposure files
pub fn build_link_routes(state: AppState) -> Router {
    Router::new()
        .route("/contracts/{id}/links", get(list_links).post(create_link))
        .route(
            "/contracts/{id}/links/{exposure_file_id}",
            delete(delete_link),
        )
        .route(
            "/contracts/{id}/exposure-files",
            get(list_linked_exposure_files),
        )
        .with_state(state)
}
