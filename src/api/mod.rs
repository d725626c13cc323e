//! API layer - HTTP handlers and routing
//!
//! - HTML form and result pages
//! - Document downloads
//! - JSON contract API under /api/v1

pub mod contracts;
pub mod exports;
pub mod form;
pub mod middleware;
pub mod responses;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState};

/// Build the JSON API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(contracts::router())
        .route("/exports", post(exports::export_json))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::show_form))
        .route("/generate", post(form::submit_form))
        .route("/export/{format}", post(exports::download))
        .nest("/api/v1", build_api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
