//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for dashboard reports and statements
//! - An in-memory bill store
//! - Error to HTTP response mapping

pub mod error;
pub mod routes;
pub mod store;

use axum::Router;
use nepfin_shared::CompanyConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use store::{BillStore, StoreError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Bill records.
    pub store: Arc<BillStore>,
    /// Company details for statement headers.
    pub company: Arc<CompanyConfig>,
}

impl AppState {
    /// Creates application state.
    #[must_use]
    pub fn new(store: BillStore, company: CompanyConfig) -> Self {
        Self {
            store: Arc::new(store),
            company: Arc::new(company),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
