pub mod auth;
pub mod favorites;
pub mod videos;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;

use crate::AppState;

async fn health() -> &'static str {
    "ok"
}

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(favorites::routes())
        .merge(videos::routes())
}
