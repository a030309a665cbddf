use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::reports::dtos::{MediaAttachmentResponseDto, ReportResponseDto};

/// Database model for crime report
#[derive(Debug, Clone, FromRow)]
pub struct CrimeReport {
    pub id: i64,
    pub crime_type: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl CrimeReport {
    pub fn into_response(self, attachments: Vec<MediaAttachmentResponseDto>) -> ReportResponseDto {
        ReportResponseDto {
            id: self.id,
            crime_type: self.crime_type,
            description: self.description,
            date_time: self.date_time,
            address: self.address,
            postcode: self.postcode,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
            attachments,
        }
    }
}
