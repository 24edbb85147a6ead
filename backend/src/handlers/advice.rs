//! JSON API handlers for advisories and the query log

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use shared::{AdvisoryReport, Limit, Units};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{AdvisoryService, QueryLogStore, QueryRecord};
use crate::AppState;

/// Query parameters for an advisory lookup
#[derive(Debug, Deserialize, Validate)]
pub struct AdviceQuery {
    #[serde(default)]
    #[validate(length(max = 256, message = "City query is too long"))]
    pub city: String,
}

/// Get the advisory for a city
pub async fn get_advice(
    State(state): State<AppState>,
    Query(query): Query<AdviceQuery>,
) -> AppResult<Json<AdvisoryReport>> {
    query.validate()?;

    let service = AdvisoryService::new(state.weather, state.db);
    let report = service.advise(&query.city).await?;
    Ok(Json(report))
}

/// Query parameters for scoring a caller-supplied payload
#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// Unit system of the payload; defaults to the configured units
    pub units: Option<Units>,
}

/// Score a raw provider payload without a weather lookup
pub async fn score_payload(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
    Json(payload): Json<Value>,
) -> AppResult<Json<AdvisoryReport>> {
    let units = query.units.unwrap_or(state.config.weather.units);
    let report = AdvisoryService::score_payload(&payload, units)?;
    Ok(Json(report))
}

/// Query parameters for the query log
#[derive(Debug, Deserialize)]
pub struct QueriesQuery {
    pub limit: Option<u32>,
}

/// List recently logged queries
pub async fn list_queries(
    State(state): State<AppState>,
    Query(query): Query<QueriesQuery>,
) -> AppResult<Json<Vec<QueryRecord>>> {
    let db = state.db.ok_or(AppError::PersistenceDisabled)?;

    let store = QueryLogStore::new(db);
    let records = store.recent_queries(Limit::new(query.limit)).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_query_length_guard() {
        let ok = AdviceQuery {
            city: "Berlin".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = AdviceQuery {
            city: "x".repeat(300),
        };
        let err: AppError = too_long.validate().unwrap_err().into();
        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "city");
                assert_eq!(message, "City query is too long");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
