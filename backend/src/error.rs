//! Error handling for Spores & Outdoors
//!
//! Provides consistent JSON error responses and the friendly messages shown
//! in the HTML interface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Weather provider errors
    #[error("Weather API key is not configured")]
    MissingApiKey,

    #[error("Weather API rejected the API key")]
    InvalidApiKey,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather service unavailable: {0}")]
    WeatherServiceUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Persistence errors
    #[error("Query logging is not configured")]
    PersistenceDisabled,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error for a request field
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for showing to the person using the web page
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingApiKey => {
                "Missing OpenWeather API key. Set OPENWEATHER_API_KEY or SPORES__WEATHER__API_KEY."
                    .to_string()
            }
            AppError::InvalidApiKey => {
                "Invalid API key. Please check your OpenWeather API key.".to_string()
            }
            AppError::CityNotFound(city) => format!(
                "City '{}' not found. Please check the spelling and try again.",
                city
            ),
            AppError::WeatherServiceUnavailable(_) => {
                "Weather service temporarily unavailable. Please try again in a moment."
                    .to_string()
            }
            AppError::Network(_) => {
                "Unable to reach the weather service. Please check your connection and try again."
                    .to_string()
            }
            AppError::Validation { message, .. } => message.clone(),
            AppError::PersistenceDisabled => {
                "Query history is not available because no database is configured.".to_string()
            }
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            AppError::Configuration(_) => {
                "The server is misconfigured. Please contact the administrator.".to_string()
            }
            AppError::Internal(_) | AppError::InternalError(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_API_KEY"),
            AppError::InvalidApiKey => (StatusCode::BAD_GATEWAY, "INVALID_API_KEY"),
            AppError::CityNotFound(_) => (StatusCode::NOT_FOUND, "CITY_NOT_FOUND"),
            AppError::WeatherServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "WEATHER_SERVICE_UNAVAILABLE")
            }
            AppError::Network(_) => (StatusCode::GATEWAY_TIMEOUT, "NETWORK_ERROR"),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::PersistenceDisabled => {
                (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_DISABLED")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::Internal(_) | AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.to_string(), message)
            });

        match first {
            Some((field, message)) => AppError::Validation { field, message },
            None => AppError::validation("request", "Invalid request"),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };

        let error_detail = ErrorDetail {
            code: code.to_string(),
            message: self.user_message(),
            field,
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request failed: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
