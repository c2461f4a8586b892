//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Record counts and uptime.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let customers = state.store.customer_count().await;
    let appointments = state.store.appointments().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        customers,
        appointments,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
