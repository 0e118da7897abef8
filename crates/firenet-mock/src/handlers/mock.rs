//! Test introspection endpoints, not part of the vendor API.

use axum::extract::State;
use std::sync::Arc;

use crate::services::Counters;

/// GET /mock/login-count
pub async fn login_count(State(counters): State<Arc<Counters>>) -> String {
    counters.login_count().to_string()
}

/// GET /mock/logout-count
pub async fn logout_count(State(counters): State<Arc<Counters>>) -> String {
    counters.logout_count().to_string()
}
