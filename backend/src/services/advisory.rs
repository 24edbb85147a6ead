//! Advisory service: fetch, score, recommend and log

use serde_json::Value;
use shared::{assess, validate_city, AdvisoryReport, Units};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::services::QueryLogStore;

/// City name recorded for payloads scored without a lookup
pub const CUSTOM_CITY: &str = "custom";

/// Service producing advisories for the HTML and JSON front ends
#[derive(Clone)]
pub struct AdvisoryService {
    weather_client: Option<WeatherClient>,
    query_log: Option<QueryLogStore>,
}

impl AdvisoryService {
    /// Create a new AdvisoryService instance
    pub fn new(weather_client: Option<WeatherClient>, db: Option<PgPool>) -> Self {
        Self {
            weather_client,
            query_log: db.map(QueryLogStore::new),
        }
    }

    /// Look up a city's current weather and build the advisory
    pub async fn advise(&self, city_input: &str) -> AppResult<AdvisoryReport> {
        let city = validate_city(city_input).map_err(|msg| AppError::validation("city", msg))?;

        let client = self.weather_client.as_ref().ok_or(AppError::MissingApiKey)?;
        let payload = client.fetch_current(&city).await?;

        let report = assess(&city, &payload, client.units());
        tracing::info!(
            city = %report.city,
            mushroom = report.mushroom.score,
            hiking = report.hiking.score,
            verdict = %report.recommendation,
            "Advisory computed"
        );

        if let Some(query_log) = &self.query_log {
            query_log.record(&payload, &report).await;
        }

        Ok(report)
    }

    /// Score a provider payload supplied by the caller
    pub fn score_payload(payload: &Value, units: Units) -> AppResult<AdvisoryReport> {
        if !payload.is_object() {
            return Err(AppError::validation(
                "payload",
                "Weather payload must be a JSON object",
            ));
        }

        Ok(assess(CUSTOM_CITY, payload, units))
    }
}
