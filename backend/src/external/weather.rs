//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint. The raw JSON
//! payload is returned untouched so it can be logged and normalized.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::Units;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    units: Units,
}

impl WeatherClient {
    /// Build a client from configuration.
    ///
    /// Returns `Ok(None)` when no API key is configured; requests then fail
    /// with [`AppError::MissingApiKey`] before touching the network.
    pub fn from_config(config: &WeatherConfig) -> AppResult<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        Self::with_base_url(
            api_key,
            config.api_endpoint.clone(),
            config.units,
            Duration::from_secs(config.timeout_seconds),
        )
        .map(Some)
    }

    /// Create a WeatherClient against a custom base URL (for testing)
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        units: Units,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
        })
    }

    /// Unit system requested from the provider
    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch current weather for a city name
    pub async fn fetch_current(&self, city: &str) -> AppResult<Value> {
        let url = format!("{}/weather", self.base_url);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query_value()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(city, error = %e, "Weather API request failed");
                AppError::Network(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!(
            city,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Weather API responded"
        );

        match status {
            StatusCode::UNAUTHORIZED => return Err(AppError::InvalidApiKey),
            StatusCode::NOT_FOUND => return Err(AppError::CityNotFound(city.to_string())),
            s if !s.is_success() => {
                return Err(AppError::WeatherServiceUnavailable(format!("HTTP {}", s)))
            }
            _ => {}
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Network(e.to_string())
            } else {
                AppError::WeatherServiceUnavailable(format!("Failed to read response: {}", e))
            }
        })?;

        parse_payload(&body)
    }
}

/// Parse a provider body; anything but a JSON object is a broken upstream
fn parse_payload(body: &str) -> AppResult<Value> {
    let payload: Value = serde_json::from_str(body).map_err(|e| {
        AppError::WeatherServiceUnavailable(format!("Failed to parse weather response: {}", e))
    })?;

    if !payload.is_object() {
        return Err(AppError::WeatherServiceUnavailable(
            "Weather response is not a JSON object".to_string(),
        ));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::with_base_url(
            "test_key".to_string(),
            server.uri(),
            Units::Metric,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_current_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Berlin"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 16.0, "humidity": 90 },
                "wind": { "speed": 2.0 },
                "weather": [{ "main": "Rain", "description": "light rain" }],
                "dt": 1726401600
            })))
            .mount(&mock_server)
            .await;

        let payload = client_for(&mock_server).fetch_current("Berlin").await.unwrap();
        assert_eq!(payload["main"]["humidity"], 90);
    }

    #[tokio::test]
    async fn test_invalid_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_current("Berlin").await;
        assert!(matches!(result, Err(AppError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_city_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_current("Atlantis").await;
        match result {
            Err(AppError::CityNotFound(city)) => assert_eq!(city, "Atlantis"),
            other => panic!("expected CityNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_current("Berlin").await;
        assert!(matches!(result, Err(AppError::WeatherServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_current("Berlin").await;
        assert!(matches!(result, Err(AppError::WeatherServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "main": {} }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_current("Berlin").await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = WeatherClient::with_base_url(
            "test_key".to_string(),
            "http://127.0.0.1:1".to_string(),
            Units::Metric,
            Duration::from_secs(1),
        )
        .unwrap();

        let result = client.fetch_current("Berlin").await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = WeatherConfig {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: None,
            units: Units::Metric,
            timeout_seconds: 10,
        };
        assert!(WeatherClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_parse_payload_rejects_non_objects() {
        assert!(parse_payload("[1, 2, 3]").is_err());
        assert!(parse_payload("{\"main\": {}}").is_ok());
    }
}
