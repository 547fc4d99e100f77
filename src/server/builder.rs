//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::service::LinkStore;
use crate::entities::{ContractDescriptor, ExposureFileDescriptor};
use crate::storage::{InMemoryLinkStore, seed_sample_data};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the treaty-links HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryLinkStore::new())
///     .with_config(config)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn LinkStore>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            store: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Builder with an in-memory store set up as `config.store` describes
    ///
    /// The store runs in the configured integrity mode and holds the sample
    /// dataset when `seed_sample_data` is set.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let store = InMemoryLinkStore::with_integrity(config.store.link_integrity);
        if config.store.seed_sample_data {
            seed_sample_data(&store)
                .await
                .context("failed to load sample data")?;
        }
        Ok(Self::new().with_store(store).with_config(config))
    }

    /// Set the link store (required)
    pub fn with_store(self, store: impl LinkStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set a link store that is also held elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn LinkStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add routes outside the API prefix
    ///
    /// # Example
    ///
    /// ```ignore
    /// let admin = Router::new().route("/admin/ping", get(|| async { "pong" }));
    ///
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host: store, configuration and the entity descriptors
    pub fn build_host(mut self) -> Result<ServerHost> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("LinkStore is required. Call .with_store()"))?;

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(ContractDescriptor::new(store.clone())));
        registry.register(Box::new(ExposureFileDescriptor::new(store.clone())));

        Ok(ServerHost::from_builder_components(
            store,
            self.config,
            registry,
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve on the configured address with graceful shutdown
    ///
    /// Stops on SIGTERM or Ctrl+C after in-flight requests complete.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::link::LinkIntegrity;
    use crate::storage::InMemoryLinkStore;

    #[test]
    fn test_build_host_requires_store() {
        let err = ServerBuilder::new().build_host().err().unwrap();
        assert!(err.to_string().contains("LinkStore is required"));
    }

    #[test]
    fn test_build_host_registers_entities() {
        let host = ServerBuilder::new()
            .with_store(InMemoryLinkStore::new())
            .build_host()
            .unwrap();
        assert_eq!(host.entity_types(), vec!["contract", "exposure_file"]);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.server.api_prefix = "api".to_string();
        let result = ServerBuilder::new()
            .with_store(InMemoryLinkStore::new())
            .with_config(config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_unprefixed() {
        let mut config = AppConfig::default();
        config.server.api_prefix = "/".to_string();
        assert!(
            ServerBuilder::new()
                .with_store(InMemoryLinkStore::new())
                .with_config(config)
                .build()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_from_config_seeds_and_sets_integrity() {
        let mut config = AppConfig::default();
        config.store.link_integrity = LinkIntegrity::Strict;
        let host = ServerBuilder::from_config(config)
            .await
            .unwrap()
            .build_host()
            .unwrap();

        assert_eq!(host.store.list_contracts().await.unwrap().len(), 3);
        assert!(host.store.create_link(crate::core::link::NewLink::new(1, 99)).await.is_err());
    }
}
