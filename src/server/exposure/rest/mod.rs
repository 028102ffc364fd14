//! REST API exposure
//!
//! This module provides REST-specific routing. It consumes a `ServerHost`
//! and produces an Axum `Router`.

use super::super::host::ServerHost;
use crate::server::handlers::AppState;
use crate::server::router::build_invoice_routes;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Invoice routes
    /// - Static files from the uploads directory under `/uploads`
    /// - Request tracing and, when enabled, permissive CORS
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let state = AppState {
            invoices: host.invoices.clone(),
            uploads_dir: Arc::new(host.uploads_dir().to_path_buf()),
        };

        let mut app = Self::health_routes()
            .merge(build_invoice_routes(state))
            .nest_service("/uploads", ServeDir::new(host.uploads_dir()));

        if host.config.server.allow_any_origin {
            app = app.layer(CorsLayer::permissive());
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
            "service": "invoice-store"
        }))
    }
}
