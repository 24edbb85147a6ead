//! Spores & Outdoors - Backend Server
//!
//! Tells visitors whether today's weather in their city suits mushroom
//! foraging, hiking, or staying indoors.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;
mod views;

pub use config::Config;

use external::WeatherClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Query log pool; `None` when persistence is disabled
    pub db: Option<sqlx::PgPool>,
    pub config: Arc<Config>,
    /// Weather client; `None` when no API key is configured
    pub weather: Option<WeatherClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spores_server=debug,tower_http=debug,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Spores & Outdoors Server");
    tracing::info!("Environment: {}", config.environment);

    let weather = WeatherClient::from_config(&config.weather)?;
    if weather.is_none() {
        tracing::warn!("No OpenWeather API key configured; city lookups will fail");
    }

    let db = connect_query_log(&config).await;

    // Create application state
    let state = AppState {
        db,
        config: Arc::new(config.clone()),
        weather,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect the optional query log database.
///
/// Any failure disables persistence instead of stopping the server.
async fn connect_query_log(config: &Config) -> Option<sqlx::PgPool> {
    if !config.persistence_enabled() {
        tracing::info!("No database URL configured; query logging disabled");
        return None;
    }
    let url = config.database.url.as_deref()?;

    tracing::info!("Connecting to database...");
    let pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Database unavailable; query logging disabled");
            return None;
        }
    };

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "Migrations failed; query logging disabled");
            return None;
        }
        tracing::info!("Migrations completed");
    }

    Some(pool)
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::page_routes())
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
