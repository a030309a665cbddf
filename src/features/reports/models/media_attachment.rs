use sqlx::FromRow;

use crate::features::reports::dtos::MediaAttachmentResponseDto;

/// Database model for a media file attached to a report
#[derive(Debug, Clone, FromRow)]
pub struct MediaAttachment {
    pub id: i64,
    pub report_id: i64,
    /// Path handed back by the file store
    pub file_path: String,
    pub media_type: String,
}

/// Data for attaching an already stored file to a report
#[derive(Debug, Clone)]
#[allow(dead_code)] // no upload route yet
pub struct CreateMediaAttachment {
    pub report_id: i64,
    pub file_path: String,
    pub media_type: String,
}

impl From<MediaAttachment> for MediaAttachmentResponseDto {
    fn from(a: MediaAttachment) -> Self {
        Self {
            id: a.id,
            file_path: a.file_path,
            media_type: a.media_type,
        }
    }
}
