//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::QueryLogStore;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub weather_api: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_status = match state.db {
        Some(db) => {
            if QueryLogStore::new(db).ping().await {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "disabled",
    };

    let weather_status = if state.weather.is_some() {
        "configured"
    } else {
        "missing_api_key"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status.to_string(),
        weather_api: weather_status.to_string(),
    })
}
