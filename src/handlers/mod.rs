//! HTTP request handlers

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::status::StatusReconciler;

mod dashboard;
mod status;

/// Create the dashboard router
pub fn create_router(reconciler: Arc<StatusReconciler>) -> Router {
    Router::new()
        .route("/api/status", get(status::status_handler))
        .fallback(dashboard::dashboard_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(reconciler)
}
