use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::alerts::handlers;
use crate::features::alerts::services::AlertService;

/// Create routes for the alerts feature (public)
pub fn routes(service: Arc<AlertService>) -> Router {
    Router::new()
        .route(
            "/api/alerts",
            get(handlers::list_alert_subscriptions).post(handlers::create_alert_subscription),
        )
        .with_state(service)
}
