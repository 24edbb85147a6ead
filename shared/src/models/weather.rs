//! Weather data models and provider payload normalization

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Units;

/// Flat, defaulted weather record consumed by the scorers
///
/// Every numeric field is zero when the provider omitted it. The three
/// optional fields are `None` when unknown and their scoring rules are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeather {
    /// Air temperature in °C
    #[serde(default)]
    pub temperature: f64,
    /// Relative humidity, 0-100 %
    #[serde(default)]
    pub humidity: f64,
    /// Wind speed in m/s
    #[serde(default)]
    pub wind_speed: f64,
    /// Sum of the provider's short-window rain amounts, in mm
    #[serde(default)]
    pub rainfall_24h: f64,
    /// Currently the same value as `rainfall_24h`
    #[serde(default)]
    pub rainfall_48h: f64,
    /// Calendar month 1-12, or 0 when the observation time is unknown
    #[serde(default)]
    pub month: u32,
    /// Soil moisture in %
    #[serde(default)]
    pub soil_moisture: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
    #[serde(default)]
    pub daylight_hours: Option<f64>,
}

/// Condition descriptor from `weather[0]` of the provider payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    /// Condition group, e.g. "Rain"
    pub main: Option<String>,
    /// Free-text description, e.g. "light rain"
    pub description: Option<String>,
}

impl WeatherConditions {
    /// Extract the condition descriptor, tolerating any payload shape
    pub fn from_payload(raw: &Value) -> Self {
        let first = raw.get("weather").and_then(|w| w.get(0));
        let text = |key: &str| {
            first
                .and_then(|w| w.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            main: text("main"),
            description: text("description"),
        }
    }

    /// Description in title case, or an em dash placeholder when missing
    pub fn display_description(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => title_case(desc),
            _ => "—".to_string(),
        }
    }

    pub fn display_main(&self) -> &str {
        self.main.as_deref().unwrap_or("—")
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Read a number at `section.key`, treating anything missing or non-numeric as 0
fn number_at(raw: &Value, section: &str, key: &str) -> f64 {
    raw.get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// UTC month of a Unix timestamp field; 0 when absent, zero or unparseable
fn month_from_timestamp(raw: &Value) -> u32 {
    let seconds = match raw.get("dt") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    };

    seconds
        .filter(|s| *s != 0)
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.month())
        .unwrap_or(0)
}

/// Normalize a metric provider payload
pub fn normalize(raw: &Value) -> NormalizedWeather {
    normalize_with_units(raw, Units::Metric)
}

/// Normalize a provider payload fetched in the given unit system
///
/// Never fails: missing sections and fields resolve to their defaults.
pub fn normalize_with_units(raw: &Value, units: Units) -> NormalizedWeather {
    let temperature = units.temperature_to_celsius(number_at(raw, "main", "temp"));
    let humidity = number_at(raw, "main", "humidity");
    let wind_speed = units.wind_to_mps(number_at(raw, "wind", "speed"));

    // Provider only reports recent windows, so the 48h figure reuses the same sum
    let rainfall_24h = number_at(raw, "rain", "1h") + number_at(raw, "rain", "3h");

    NormalizedWeather {
        temperature,
        humidity,
        wind_speed,
        rainfall_24h,
        rainfall_48h: rainfall_24h,
        month: month_from_timestamp(raw),
        soil_moisture: None,
        uv_index: None,
        daylight_hours: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_payload() {
        // 2024-09-15T12:00:00Z
        let raw = json!({
            "main": { "temp": 16.4, "humidity": 88 },
            "wind": { "speed": 3.1 },
            "rain": { "1h": 1.5, "3h": 4.0 },
            "weather": [{ "main": "Rain", "description": "light rain" }],
            "dt": 1726401600
        });

        let weather = normalize(&raw);
        assert_eq!(weather.temperature, 16.4);
        assert_eq!(weather.humidity, 88.0);
        assert_eq!(weather.wind_speed, 3.1);
        assert_eq!(weather.rainfall_24h, 5.5);
        assert_eq!(weather.rainfall_48h, 5.5);
        assert_eq!(weather.month, 9);
        assert!(weather.soil_moisture.is_none());
        assert!(weather.uv_index.is_none());
        assert!(weather.daylight_hours.is_none());
    }

    #[test]
    fn test_normalize_missing_rain() {
        let raw = json!({ "main": { "temp": 10.0, "humidity": 50 }, "dt": 1726401600 });
        let weather = normalize(&raw);
        assert_eq!(weather.rainfall_24h, 0.0);
        assert_eq!(weather.rainfall_48h, 0.0);
    }

    #[test]
    fn test_normalize_partial_rain() {
        let raw = json!({ "rain": { "3h": 2.5 } });
        assert_eq!(normalize(&raw).rainfall_24h, 2.5);
    }

    #[test]
    fn test_normalize_empty_payload() {
        let weather = normalize(&json!({}));
        assert_eq!(weather, NormalizedWeather::default());
    }

    #[test]
    fn test_normalize_non_object_payload() {
        assert_eq!(normalize(&json!(null)), NormalizedWeather::default());
        assert_eq!(normalize(&json!([1, 2, 3])), NormalizedWeather::default());
    }

    #[test]
    fn test_normalize_malformed_fields_default_to_zero() {
        let raw = json!({
            "main": { "temp": "warm", "humidity": null },
            "wind": "calm",
            "dt": "yesterday"
        });
        let weather = normalize(&raw);
        assert_eq!(weather.temperature, 0.0);
        assert_eq!(weather.humidity, 0.0);
        assert_eq!(weather.wind_speed, 0.0);
        assert_eq!(weather.month, 0);
    }

    #[test]
    fn test_month_unknown_without_timestamp() {
        assert_eq!(normalize(&json!({ "main": { "temp": 12 } })).month, 0);
        assert_eq!(normalize(&json!({ "dt": 0 })).month, 0);
    }

    #[test]
    fn test_month_from_timestamp() {
        // 2024-01-01T00:00:00Z
        assert_eq!(normalize(&json!({ "dt": 1704067200 })).month, 1);
        // 2024-12-31T23:59:59Z
        assert_eq!(normalize(&json!({ "dt": 1735689599 })).month, 12);
    }

    #[test]
    fn test_normalize_imperial_payload() {
        let raw = json!({ "main": { "temp": 68.0 }, "wind": { "speed": 10.0 } });
        let weather = normalize_with_units(&raw, Units::Imperial);
        assert!((weather.temperature - 20.0).abs() < 1e-9);
        assert!((weather.wind_speed - 4.4704).abs() < 1e-9);
    }

    #[test]
    fn test_conditions_from_payload() {
        let raw = json!({ "weather": [{ "main": "Clouds", "description": "broken clouds" }] });
        let conditions = WeatherConditions::from_payload(&raw);
        assert_eq!(conditions.display_main(), "Clouds");
        assert_eq!(conditions.display_description(), "Broken Clouds");
    }

    #[test]
    fn test_conditions_missing() {
        let conditions = WeatherConditions::from_payload(&json!({ "weather": [] }));
        assert_eq!(conditions, WeatherConditions::default());
        assert_eq!(conditions.display_main(), "—");
        assert_eq!(conditions.display_description(), "—");
    }
}
