//! Compose the route tables into one application.

use crate::routes::{common_routes, entity_routes};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Bodies over `body_limit` bytes are rejected by the JSON extractor with 413,
/// whether or not the client sent `Content-Length`.
pub fn build_app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}
