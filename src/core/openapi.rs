use utoipa::{Modify, OpenApi};

use crate::features::alerts::{dtos as alerts_dtos, handlers as alerts_handlers};
use crate::features::health::handlers as health_handlers;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::root,
        // Users
        users_handlers::register,
        users_handlers::login,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        // Alerts
        alerts_handlers::create_alert_subscription,
        alerts_handlers::list_alert_subscriptions,
    ),
    components(
        schemas(
            // Shared
            MessageResponse,
            // Users
            users_dtos::RegisterUserDto,
            users_dtos::LoginRequestDto,
            users_dtos::UserResponseDto,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::MediaAttachmentResponseDto,
            reports_dtos::ReportResponseDto,
            // Alerts
            alerts_dtos::CreateAlertSubscriptionDto,
            alerts_dtos::AlertSubscriptionResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "users", description = "Registration and credential check"),
        (name = "reports", description = "Citizen crime reports"),
        (name = "alerts", description = "Geofenced alert subscriptions"),
    ),
    info(
        title = "MappingCrimeFrance API",
        version = "0.1.0",
        description = "API pour déclarations citoyennes d'infractions",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/api/register", "/api/login", "/api/reports", "/api/alerts"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging build".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("staging build"));
    }
}
