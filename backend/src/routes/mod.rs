//! Route definitions for Spores & Outdoors

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/advice", get(handlers::get_advice))
        .route("/score", post(handlers::score_payload))
        .route("/queries", get(handlers::list_queries))
}

/// HTML pages served at the site root
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/advice", get(handlers::advice_page))
}
