//! Query log persistence: raw weather snapshots and computed scores

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use shared::{validate_score, AdvisoryReport, Limit, Recommendation};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Query log store backed by PostgreSQL
#[derive(Clone)]
pub struct QueryLogStore {
    db: PgPool,
}

/// A logged user query
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QueryRecord {
    pub id: Uuid,
    pub city: String,
    pub mushroom_score: Decimal,
    pub hiking_score: Decimal,
    pub verdict: String,
    pub created_at: DateTime<Utc>,
}

/// Convert a 0-10 score into the one-decimal column representation
pub fn score_to_decimal(score: f64) -> AppResult<Decimal> {
    validate_score(score).map_err(|msg| AppError::validation("score", msg))?;

    Decimal::from_f64_retain(score)
        .map(|d| d.round_dp(1))
        .ok_or_else(|| AppError::Internal(format!("Score {} is not representable", score)))
}

impl QueryLogStore {
    /// Create a new QueryLogStore instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store the raw provider payload for a city
    pub async fn insert_weather(&self, city: &str, payload: &Value) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO weather_data (id, city, payload)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(city)
        .bind(payload)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// Store the scores and verdict computed for a city
    pub async fn insert_user_query(
        &self,
        city: &str,
        mushroom_score: f64,
        hiking_score: f64,
        verdict: Recommendation,
    ) -> AppResult<Uuid> {
        let mushroom = score_to_decimal(mushroom_score)?;
        let hiking = score_to_decimal(hiking_score)?;

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO user_queries (id, city, mushroom_score, hiking_score, verdict)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(city)
        .bind(mushroom)
        .bind(hiking)
        .bind(verdict.label())
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// Log both the snapshot and the resulting scores.
    ///
    /// The two writes are independent; a failure is logged and never reaches
    /// the caller.
    pub async fn record(&self, payload: &Value, report: &AdvisoryReport) {
        if let Err(e) = self.insert_weather(&report.city, payload).await {
            tracing::warn!(city = %report.city, error = %e, "Failed to store weather snapshot");
        }

        if let Err(e) = self
            .insert_user_query(
                &report.city,
                report.mushroom.score,
                report.hiking.score,
                report.recommendation,
            )
            .await
        {
            tracing::warn!(city = %report.city, error = %e, "Failed to store user query");
        }
    }

    /// Latest logged queries, newest first
    pub async fn recent_queries(&self, limit: Limit) -> AppResult<Vec<QueryRecord>> {
        let records = sqlx::query_as::<_, QueryRecord>(
            r#"
            SELECT id, city, mushroom_score, hiking_score, verdict, created_at
            FROM user_queries
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit.get()))
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// Check database connectivity
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }
}
