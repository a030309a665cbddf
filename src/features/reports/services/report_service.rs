use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateReportDto, MediaAttachmentResponseDto, ReportResponseDto,
};
use crate::features::reports::models::{CreateMediaAttachment, CrimeReport, MediaAttachment};

/// Service for report operations
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new report. A fresh report never has attachments.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let report = sqlx::query_as::<_, CrimeReport>(
            r#"
            INSERT INTO crime_reports (
                crime_type, description, date_time, address, postcode, city,
                latitude, longitude, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, crime_type, description, date_time, address, postcode, city,
                      latitude, longitude, created_at
            "#,
        )
        .bind(&dto.crime_type)
        .bind(&dto.description)
        .bind(dto.date_time)
        .bind(&dto.address)
        .bind(&dto.postcode)
        .bind(&dto.city)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: id={}, crime_type={}",
            report.id,
            report.crime_type
        );

        Ok(report.into_response(Vec::new()))
    }

    /// List every report, oldest first, each with its attachments
    pub async fn list(&self) -> Result<Vec<ReportResponseDto>> {
        let reports = sqlx::query_as::<_, CrimeReport>(
            r#"
            SELECT id, crime_type, description, date_time, address, postcode, city,
                   latitude, longitude, created_at
            FROM crime_reports
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        let attachments = sqlx::query_as::<_, MediaAttachment>(
            r#"
            SELECT id, report_id, file_path, media_type
            FROM media_attachments
            ORDER BY report_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report attachments: {:?}", e);
            AppError::Database(e)
        })?;

        let mut by_report: HashMap<i64, Vec<MediaAttachmentResponseDto>> = HashMap::new();
        for attachment in attachments {
            by_report
                .entry(attachment.report_id)
                .or_default()
                .push(attachment.into());
        }

        Ok(reports
            .into_iter()
            .map(|report| {
                let attachments = by_report.remove(&report.id).unwrap_or_default();
                report.into_response(attachments)
            })
            .collect())
    }
}

// Attachment writes and report deletion have no HTTP route (no upload endpoint)
#[allow(dead_code)]
impl ReportService {
    /// Record a stored media file against an existing report
    pub async fn add_attachment(
        &self,
        data: &CreateMediaAttachment,
    ) -> Result<MediaAttachmentResponseDto> {
        let mut tx = self.pool.begin().await?;

        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM crime_reports WHERE id = ?)")
                .bind(data.report_id)
                .fetch_one(&mut *tx)
                .await?;

        if exists == 0 {
            return Err(AppError::NotFound(format!(
                "Report {} not found",
                data.report_id
            )));
        }

        let attachment = sqlx::query_as::<_, MediaAttachment>(
            r#"
            INSERT INTO media_attachments (report_id, file_path, media_type, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, report_id, file_path, media_type
            "#,
        )
        .bind(data.report_id)
        .bind(&data.file_path)
        .bind(&data.media_type)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report attachment: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await?;

        tracing::info!(
            "Attached {} to report {}",
            attachment.media_type,
            attachment.report_id
        );

        Ok(attachment.into())
    }

    /// Delete a report together with its attachments in one transaction
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let removed_attachments = sqlx::query("DELETE FROM media_attachments WHERE report_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM crime_reports WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tx.commit().await?;

        tracing::info!(
            "Deleted report {} and {} attachment(s)",
            id,
            removed_attachments
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use chrono::TimeZone;

    fn report_dto(crime_type: &str) -> CreateReportDto {
        CreateReportDto {
            crime_type: crime_type.to_string(),
            description: Some("Vitre brisée".to_string()),
            date_time: Utc.with_ymd_and_hms(2024, 5, 17, 22, 30, 0).unwrap(),
            address: "10 place Bellecour".to_string(),
            postcode: "69002".to_string(),
            city: "Lyon".to_string(),
            latitude: 45.7578,
            longitude: 4.8320,
        }
    }

    fn attachment(report_id: i64, path: &str) -> CreateMediaAttachment {
        CreateMediaAttachment {
            report_id,
            file_path: path.to_string(),
            media_type: "image/jpeg".to_string(),
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_round_trips_fields() {
        let service = ReportService::new(test_pool().await);
        let dto = report_dto("Vol");

        let report = service.create(dto.clone()).await.unwrap();

        assert_eq!(report.id, 1);
        assert_eq!(report.crime_type, dto.crime_type);
        assert_eq!(report.description, dto.description);
        assert_eq!(report.date_time, dto.date_time);
        assert_eq!(report.city, dto.city);
        assert_eq!(report.latitude, dto.latitude);
        assert_eq!(report.longitude, dto.longitude);
        assert!(report.attachments.is_empty());

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![report]);
    }

    #[tokio::test]
    async fn test_coordinates_are_not_range_checked() {
        let service = ReportService::new(test_pool().await);
        let mut dto = report_dto("Autre");
        dto.latitude = 512.0;
        dto.longitude = -999.5;
        dto.description = None;

        let report = service.create(dto).await.unwrap();
        assert_eq!(report.latitude, 512.0);
        assert_eq!(report.longitude, -999.5);
        assert_eq!(report.description, None);
    }

    #[tokio::test]
    async fn test_list_groups_attachments_per_report() {
        let service = ReportService::new(test_pool().await);
        let first = service.create(report_dto("Vol")).await.unwrap();
        let second = service.create(report_dto("Cambriolage")).await.unwrap();

        service
            .add_attachment(&attachment(second.id, "uploads/2/a.jpg"))
            .await
            .unwrap();
        service
            .add_attachment(&attachment(second.id, "uploads/2/b.jpg"))
            .await
            .unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert!(listed[0].attachments.is_empty());
        let paths: Vec<_> = listed[1]
            .attachments
            .iter()
            .map(|a| a.file_path.as_str())
            .collect();
        assert_eq!(paths, vec!["uploads/2/a.jpg", "uploads/2/b.jpg"]);
    }

    #[tokio::test]
    async fn test_add_attachment_to_missing_report_is_not_found() {
        let pool = test_pool().await;
        let service = ReportService::new(pool.clone());

        let err = service
            .add_attachment(&attachment(42, "uploads/42/x.mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(count(&pool, "media_attachments").await, 0);
    }

    #[tokio::test]
    async fn test_delete_removes_attachments_with_report() {
        let pool = test_pool().await;
        let service = ReportService::new(pool.clone());
        let kept = service.create(report_dto("Vol")).await.unwrap();
        let doomed = service.create(report_dto("Agression")).await.unwrap();
        service
            .add_attachment(&attachment(kept.id, "uploads/1/a.jpg"))
            .await
            .unwrap();
        service
            .add_attachment(&attachment(doomed.id, "uploads/2/a.jpg"))
            .await
            .unwrap();

        service.delete(doomed.id).await.unwrap();

        assert_eq!(count(&pool, "crime_reports").await, 1);
        assert_eq!(count(&pool, "media_attachments").await, 1);
        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].id, kept.id);
        assert_eq!(listed[0].attachments.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_report_is_not_found() {
        let service = ReportService::new(test_pool().await);

        let err = service.delete(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
