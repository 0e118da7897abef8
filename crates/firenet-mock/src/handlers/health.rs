use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    active_sessions: usize,
    login_count: u64,
    logout_count: u64,
}

/// GET /health
///
/// Liveness plus a peek at the mock's in-memory state.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        active_sessions: state.sessions.store.len(),
        login_count: state.counters.login_count(),
        logout_count: state.counters.logout_count(),
    })
}
