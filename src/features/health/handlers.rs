use axum::Json;

use crate::shared::types::MessageResponse;

/// API liveness check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is up", body = MessageResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("API MappingCrimeFrance OK"))
}
