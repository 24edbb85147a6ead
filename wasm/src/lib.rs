//! WebAssembly module for Spores & Outdoors
//!
//! Provides client-side computation for:
//! - Weather payload normalization
//! - Mushroom foraging and hiking scores
//! - Activity recommendation and score ratings

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::{
    ActivityReport, AdvisoryReport, ConditionRating, NormalizedWeather, Recommendation,
    ScoreResult, Units,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("Spores & Outdoors scoring module loaded"));
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn parse_payload(payload_json: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(payload_json).map_err(|e| format!("Invalid weather JSON: {}", e))
}

fn parse_units(units: Option<String>) -> Result<Units, String> {
    match units {
        Some(units) => units.parse::<Units>().map_err(str::to_string),
        None => Ok(Units::Metric),
    }
}

fn normalize_json(payload_json: &str, units: Option<String>) -> Result<String, String> {
    let raw = parse_payload(payload_json)?;
    to_json(&shared::normalize_with_units(&raw, parse_units(units)?))
}

fn score_json(
    weather_json: &str,
    scorer: fn(&NormalizedWeather) -> ScoreResult,
) -> Result<String, String> {
    let weather: NormalizedWeather = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid normalized weather JSON: {}", e))?;
    to_json(&scorer(&weather))
}

fn assess_json(payload_json: &str, units: Option<String>) -> Result<String, String> {
    let raw = parse_payload(payload_json)?;
    to_json(&shared::assess("custom", &raw, parse_units(units)?))
}

/// Normalize a raw provider payload into the flat weather record
#[wasm_bindgen]
pub fn normalize_weather(payload_json: &str, units: Option<String>) -> Result<String, JsValue> {
    normalize_json(payload_json, units).map_err(|e| JsValue::from_str(&e))
}

/// Score mushroom foraging for a normalized weather record
///
/// Missing fields default, so soil moisture can be supplied when known.
#[wasm_bindgen]
pub fn score_mushroom(weather_json: &str) -> Result<String, JsValue> {
    score_json(weather_json, shared::score_mushroom).map_err(|e| JsValue::from_str(&e))
}

/// Score hiking comfort for a normalized weather record
#[wasm_bindgen]
pub fn score_hiking(weather_json: &str) -> Result<String, JsValue> {
    score_json(weather_json, shared::score_hiking).map_err(|e| JsValue::from_str(&e))
}

/// Full advisory report for a provider payload
#[wasm_bindgen]
pub fn assess_weather(payload_json: &str, units: Option<String>) -> Result<String, JsValue> {
    assess_json(payload_json, units).map_err(|e| JsValue::from_str(&e))
}

/// Recommendation label for two scores
#[wasm_bindgen]
pub fn recommend_activity(mushroom_score: f64, hiking_score: f64) -> String {
    shared::recommend(mushroom_score, hiking_score)
        .label()
        .to_string()
}

/// Verbal rating for a 0-10 score
#[wasm_bindgen]
pub fn rate_score(score: f64) -> String {
    shared::classify_score(score).to_string()
}

/// Check a city name before submitting the form
#[wasm_bindgen]
pub fn is_valid_city(input: &str) -> bool {
    shared::validate_city(input).is_ok()
}
