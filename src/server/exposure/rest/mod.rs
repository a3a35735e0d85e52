//! REST exposure for the taxi service
//!
//! Consumes a `ServerHost` and produces an Axum `Router` serving the HTML
//! pages, their JSON variants and the health checks.

use super::super::host::ServerHost;
use crate::server::router::{build_account_routes, build_index_routes};
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// REST exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Index, list and detail pages (gated)
    /// - Login and logout
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let health_routes = Self::health_routes();
        let entity_routes = host.entity_registry.build_routes();
        let index_routes = build_index_routes(host.state.clone(), host.login_gate());
        let account_routes = build_account_routes(host.state.clone());

        let mut app = health_routes
            .merge(index_routes)
            .merge(account_routes)
            .merge(entity_routes);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
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
            "service": "taxi-service"
        }))
    }
}
