use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all onceread endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/entries", post(handler::create_entry))
        .route("/v1/entries/:key", get(handler::consume_entry))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
