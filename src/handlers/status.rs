//! Status endpoint handler

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::status::{AggregatedStatus, StatusReconciler};

/// Aggregated status, recomputed on every request
pub async fn status_handler(
    State(reconciler): State<Arc<StatusReconciler>>,
) -> Json<AggregatedStatus> {
    Json(reconciler.compute_status().await)
}
