//! Entity descriptor for Contract

use super::{ContractAppState, create_contract, get_contract, list_contracts};
use crate::core::service::LinkStore;
use crate::server::EntityDescriptor;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Contract entity
pub struct ContractDescriptor {
    pub store: Arc<dyn LinkStore>,
}

impl ContractDescriptor {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for ContractDescriptor {
    fn entity_type(&self) -> &str {
        "contract"
    }

    fn plural(&self) -> &str {
        "contracts"
    }

    fn build_routes(&self) -> Router {
        let state = ContractAppState {
            store: self.store.clone(),
        };

        Router::new()
            .route("/contracts", get(list_contracts).post(create_contract))
            .route("/contracts/{id}", get(get_contract))
            .with_state(state)
    }
}
