//! dentamap - directory-listing web service for dentists in Morocco
//!
//! Public catalog (browse/search/filter, detail pages) plus an
//! admin-gated CRUD API over a single dentist-record table. External
//! collaborators (identity provider, object-storage host) are injected as
//! trait objects through `AppState` so the API and auth gate are testable
//! without a live network.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AdminPolicy, TokenVerifier};
use crate::services::ImageHost;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Identity-provider token verification
    pub verifier: Arc<dyn TokenVerifier>,
    /// Authorization predicate over verified claims
    pub admin_policy: Arc<dyn AdminPolicy>,
    /// Object-storage image re-hosting
    pub image_host: Arc<dyn ImageHost>,
    /// Width of the bounded fan-out during bulk image ingestion
    pub ingest_concurrency: usize,
    /// Externally-facing API base URL, handed to the UI pages
    pub public_api_url: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        verifier: Arc<dyn TokenVerifier>,
        admin_policy: Arc<dyn AdminPolicy>,
        image_host: Arc<dyn ImageHost>,
        ingest_concurrency: usize,
        public_api_url: String,
    ) -> Self {
        Self {
            db,
            verifier,
            admin_policy,
            image_host,
            ingest_concurrency,
            public_api_url,
            startup_time: Utc::now(),
        }
    }
}

/// Build the application router
///
/// CORS is wide open: the read surface is public by design and the admin
/// token travels in the Authorization header.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::dentist_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
