use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for subscribing to alerts around a point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAlertSubscriptionDto {
    /// Address to notify. Not required to belong to a registered user.
    pub email: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    /// Crime types to watch, e.g. `["Vol", "Cambriolage"]`
    pub crime_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertSubscriptionResponseDto {
    pub id: i64,
    pub email: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    pub crime_types: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
