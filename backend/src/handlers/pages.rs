//! HTML page handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use crate::handlers::advice::AdviceQuery;
use crate::services::AdvisoryService;
use crate::{views, AppState};

/// Landing page
pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// Advisory page for the submitted city
pub async fn advice_page(
    State(state): State<AppState>,
    Query(query): Query<AdviceQuery>,
) -> (StatusCode, Html<String>) {
    let service = AdvisoryService::new(state.weather, state.db);

    let result = match validator::Validate::validate(&query) {
        Ok(()) => service.advise(&query.city).await,
        Err(errors) => Err(errors.into()),
    };

    match result {
        Ok(report) => (StatusCode::OK, Html(views::advice_page(&report))),
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!(city = %query.city, "Advisory failed: {:?}", err);
            } else {
                tracing::warn!(city = %query.city, "Advisory failed: {}", err);
            }
            (err.status(), Html(views::error_page(query.city.trim(), &err)))
        }
    }
}
