//! Configuration management for Spores & Outdoors
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Legacy `OPENWEATHER_API_KEY` / `DATABASE_URL` environment variables
//! 3. Configuration files (development.toml, production.toml)
//! 4. Environment variable overrides with SPORES__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Units;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; query logging is disabled when unset
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: Option<String>,

    /// Unit system requested from the provider
    pub units: Units,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log format (pretty or json)
    pub format: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SPORES_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8501)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.units", "metric")?
            .set_default("weather.timeout_seconds", 10)?
            .set_default("logging.format", "pretty")?;

        // Plain variables used by earlier deployments
        if let Ok(api_key) = std::env::var("OPENWEATHER_API_KEY") {
            builder = builder.set_default("weather.api_key", api_key)?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }

        let config: Config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SPORES__ prefix)
            .add_source(
                Environment::with_prefix("SPORES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=60).contains(&self.weather.timeout_seconds) {
            return Err(ConfigError::Message(
                "weather.timeout_seconds must be between 1 and 60".to_string(),
            ));
        }

        if !self.weather.api_endpoint.starts_with("http://")
            && !self.weather.api_endpoint.starts_with("https://")
        {
            return Err(ConfigError::Message(
                "weather.api_endpoint must be an HTTP or HTTPS URL".to_string(),
            ));
        }

        if matches!(&self.weather.api_key, Some(key) if key.trim().is_empty()) {
            return Err(ConfigError::Message(
                "weather.api_key cannot be empty if provided".to_string(),
            ));
        }

        if !["pretty", "json"].contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Message(format!(
                "Invalid log format '{}'. Must be one of: pretty, json",
                self.logging.format
            )));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Message(
                "database.min_connections cannot exceed database.max_connections".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether queries are logged to PostgreSQL
    pub fn persistence_enabled(&self) -> bool {
        self.database.url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                min_connections: 1,
            },
            weather: WeatherConfig {
                api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
                api_key: None,
                units: Units::Metric,
                timeout_seconds: 10,
            },
            logging: LoggingConfig {
                format: "pretty".to_string(),
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8501,
            host: "0.0.0.0".to_string(),
        }
    }
}
