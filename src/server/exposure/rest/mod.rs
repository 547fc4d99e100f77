//! REST API exposure
//!
//! Consumes a `ServerHost` and produces the Axum `Router`: health routes at
//! the root, everything else nested under the configured API prefix.

use super::super::host::ServerHost;
use crate::links::handlers::AppState;
use crate::reports::{ReportAppState, build_report_routes};
use crate::server::router::build_link_routes;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// The returned router has:
    /// - Health check routes (`/health`, `/healthz`)
    /// - Entity routes, link routes and report routes under the API prefix
    /// - Custom routes, merged at the root
    /// - Request tracing and permissive CORS on every route
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let link_state = AppState {
            store: host.store.clone(),
        };
        let report_state = ReportAppState {
            store: host.store.clone(),
        };

        let api = host
            .entity_registry
            .build_routes()
            .merge(build_link_routes(link_state))
            .merge(build_report_routes(report_state));

        for collection in host.entity_registry.plurals() {
            tracing::debug!(prefix = host.api_prefix(), collection, "mounted entity routes");
        }

        let mut app = Self::health_routes();
        app = if host.config.is_unprefixed() {
            app.merge(api)
        } else {
            app.nest(host.api_prefix(), api)
        };

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "treaty-links"
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::builder::ServerBuilder;
    use crate::storage::InMemoryLinkStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let host = ServerBuilder::new()
            .with_store(InMemoryLinkStore::new())
            .build_host()
            .unwrap();
        RestExposure::build_router(Arc::new(host), vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_served_outside_the_prefix() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_are_nested_under_the_prefix() {
        let response = router()
            .oneshot(Request::get("/api/contracts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(Request::get("/contracts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
