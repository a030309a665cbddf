use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::services::ReportService;

/// Submit a crime report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 200, description = "Report created", body = ReportResponseDto),
        (status = 422, description = "Missing or mistyped fields")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<Json<ReportResponseDto>> {
    let report = service.create(dto).await?;
    Ok(Json(report))
}

/// List all reports
///
/// Unfiltered and unpaginated.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Every report with its attachments", body = Vec<ReportResponseDto>)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = service.list().await?;
    Ok(Json(reports))
}
