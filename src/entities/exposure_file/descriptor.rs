//! Entity descriptor for ExposureFile

use super::{
    ExposureFileAppState, create_exposure_file, get_exposure_file, get_exposure_overview,
    list_exposure_files,
};
use crate::core::service::LinkStore;
use crate::server::EntityDescriptor;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the ExposureFile entity
pub struct ExposureFileDescriptor {
    pub store: Arc<dyn LinkStore>,
}

impl ExposureFileDescriptor {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for ExposureFileDescriptor {
    fn entity_type(&self) -> &str {
        "exposure_file"
    }

    fn plural(&self) -> &str {
        "exposure-files"
    }

    fn build_routes(&self) -> Router {
        let state = ExposureFileAppState {
            store: self.store.clone(),
        };

        Router::new()
            .route(
                "/exposure-files",
                get(list_exposure_files).post(create_exposure_file),
            )
            .route("/exposure-files/{id}", get(get_exposure_file))
            .route("/exposure-files/{id}/overview", get(get_exposure_overview))
            .with_state(state)
    }
}
