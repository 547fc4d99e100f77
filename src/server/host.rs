//! Server host holding the state every exposure is built from

use crate::config::AppConfig;
use crate::core::service::LinkStore;
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Host context shared by the REST exposure
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(store, config, registry);
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    pub config: Arc<AppConfig>,

    /// The single store instance every handler reads and mutates
    pub store: Arc<dyn LinkStore>,

    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn from_builder_components(
        store: Arc<dyn LinkStore>,
        config: AppConfig,
        entity_registry: EntityRegistry,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            entity_registry,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn api_prefix(&self) -> &str {
        &self.config.server.api_prefix
    }
}
