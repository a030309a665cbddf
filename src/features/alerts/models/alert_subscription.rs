use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::error::{AppError, Result};
use crate::features::alerts::dtos::AlertSubscriptionResponseDto;

/// Database model for alert subscription
#[derive(Debug, Clone, FromRow)]
pub struct AlertSubscription {
    pub id: i64,
    pub email: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    /// Serialized list, see [`encode_crime_types`]
    pub crime_types: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AlertSubscription> for AlertSubscriptionResponseDto {
    fn from(a: AlertSubscription) -> Self {
        Self {
            id: a.id,
            email: a.email,
            center_lat: a.center_lat,
            center_lng: a.center_lng,
            radius_km: a.radius_km,
            crime_types: decode_crime_types(&a.crime_types),
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

/// Serialize crime types for the `crime_types` column as a JSON array.
pub fn encode_crime_types(crime_types: &[String]) -> Result<String> {
    serde_json::to_string(crime_types)
        .map_err(|e| AppError::Internal(format!("Failed to encode crime types: {}", e)))
}

/// Read the `crime_types` column back into a list.
///
/// Older rows hold a comma-joined string ("Vol,Cambriolage"). Those are split on `,`,
/// and an empty string means an empty list rather than `[""]`.
pub fn decode_crime_types(stored: &str) -> Vec<String> {
    if stored.trim_start().starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(stored) {
            return list;
        }
    }

    if stored.is_empty() {
        return Vec::new();
    }

    stored.split(',').map(str::to_string).collect()
}
