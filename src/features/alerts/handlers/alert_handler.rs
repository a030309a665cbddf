use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::alerts::dtos::{AlertSubscriptionResponseDto, CreateAlertSubscriptionDto};
use crate::features::alerts::services::AlertService;

/// Subscribe to alerts
#[utoipa::path(
    post,
    path = "/api/alerts",
    request_body = CreateAlertSubscriptionDto,
    responses(
        (status = 200, description = "Subscription created", body = AlertSubscriptionResponseDto),
        (status = 422, description = "Missing or mistyped fields")
    ),
    tag = "alerts"
)]
pub async fn create_alert_subscription(
    State(service): State<Arc<AlertService>>,
    AppJson(dto): AppJson<CreateAlertSubscriptionDto>,
) -> Result<Json<AlertSubscriptionResponseDto>> {
    let subscription = service.create(dto).await?;
    Ok(Json(subscription))
}

/// List alert subscriptions
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "Every subscription", body = Vec<AlertSubscriptionResponseDto>)
    ),
    tag = "alerts"
)]
pub async fn list_alert_subscriptions(
    State(service): State<Arc<AlertService>>,
) -> Result<Json<Vec<AlertSubscriptionResponseDto>>> {
    let subscriptions = service.list().await?;
    Ok(Json(subscriptions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::alerts::routes;
    use crate::shared::test_helpers::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server() -> TestServer {
        let pool = test_pool().await;
        let app = routes::routes(Arc::new(AlertService::new(pool)));
        TestServer::new(app).unwrap()
    }

    fn body(crime_types: Value) -> Value {
        json!({
            "email": "a@b.com",
            "center_lat": 48.8566,
            "center_lng": 2.3522,
            "radius_km": 5.0,
            "crime_types": crime_types
        })
    }

    #[tokio::test]
    async fn test_create_then_list_two_crime_types() {
        let server = server().await;

        let created = server
            .post("/api/alerts")
            .json(&body(json!(["Vol", "Cambriolage"])))
            .await;
        created.assert_status_ok();
        let created: Value = created.json();
        assert_eq!(created["id"], 1);
        assert_eq!(created["crime_types"], json!(["Vol", "Cambriolage"]));
        assert_eq!(created["is_active"], true);

        let listed: Vec<Value> = server.get("/api/alerts").await.json();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["crime_types"], json!(["Vol", "Cambriolage"]));
        assert_eq!(listed[0], created);
    }

    #[tokio::test]
    async fn test_empty_crime_types_list_back_as_empty() {
        let server = server().await;

        server
            .post("/api/alerts")
            .json(&body(json!([])))
            .await
            .assert_status_ok();

        let listed: Vec<Value> = server.get("/api/alerts").await.json();
        assert_eq!(listed[0]["crime_types"], json!([]));
    }

    #[tokio::test]
    async fn test_crime_types_must_be_a_list() {
        let server = server().await;

        let response = server
            .post("/api/alerts")
            .json(&body(json!("Vol,Cambriolage")))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
