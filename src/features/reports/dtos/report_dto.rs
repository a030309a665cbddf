use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for submitting a report
///
/// Crime type is free text and coordinates are not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateReportDto {
    pub crime_type: String,
    pub description: Option<String>,
    /// When the incident happened. A timestamp without offset is read as UTC.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_time: DateTime<Utc>,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Attachment metadata as exposed on a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaAttachmentResponseDto {
    pub id: i64,
    pub file_path: String,
    /// MIME type, e.g. `image/jpeg`
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
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
    pub attachments: Vec<MediaAttachmentResponseDto>,
}

/// Lenient ISO 8601 reader for incident timestamps
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
            return Some(dt);
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid timestamp `{}`, expected ISO 8601", raw))
        })
    }
}
