use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::alerts::dtos::{AlertSubscriptionResponseDto, CreateAlertSubscriptionDto};
use crate::features::alerts::models::{encode_crime_types, AlertSubscription};

/// Service for alert subscriptions
pub struct AlertService {
    pool: SqlitePool,
}

impl AlertService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new subscription. Subscriptions start active.
    pub async fn create(
        &self,
        dto: CreateAlertSubscriptionDto,
    ) -> Result<AlertSubscriptionResponseDto> {
        let crime_types = encode_crime_types(&dto.crime_types)?;

        let subscription = sqlx::query_as::<_, AlertSubscription>(
            r#"
            INSERT INTO alert_subscriptions (
                email, center_lat, center_lng, radius_km, crime_types, is_active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, email, center_lat, center_lng, radius_km, crime_types,
                      is_active, created_at
            "#,
        )
        .bind(&dto.email)
        .bind(dto.center_lat)
        .bind(dto.center_lng)
        .bind(dto.radius_km)
        .bind(&crime_types)
        .bind(true)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create alert subscription: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Alert subscription created: id={}, radius_km={}, crime_types={}",
            subscription.id,
            subscription.radius_km,
            subscription.crime_types
        );

        Ok(subscription.into())
    }

    /// List every subscription, oldest first
    pub async fn list(&self) -> Result<Vec<AlertSubscriptionResponseDto>> {
        let subscriptions = sqlx::query_as::<_, AlertSubscription>(
            r#"
            SELECT id, email, center_lat, center_lng, radius_km, crime_types,
                   is_active, created_at
            FROM alert_subscriptions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list alert subscriptions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(subscriptions.into_iter().map(Into::into).collect())
    }
}
