pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Test introspection
    let mock_routes = Router::new()
        .route("/mock/login-count", get(handlers::mock::login_count))
        .route("/mock/logout-count", get(handlers::mock::logout_count));

    // Web frontend
    let web_routes = Router::new()
        .route("/web/login", post(handlers::web::login))
        .route("/web/logout", get(handlers::web::logout))
        .route("/web/summary", get(handlers::web::summary));

    // Client API
    let api_routes = Router::new()
        .route(
            "/api/client/{stove_id}/status",
            get(handlers::client::stove_status),
        )
        .route(
            "/api/client/{stove_id}/controls",
            post(handlers::client::stove_controls),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(mock_routes)
        .merge(web_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
