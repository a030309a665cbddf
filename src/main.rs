mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::alerts::{routes as alerts_routes, AlertService};
use crate::features::health::routes as health_routes;
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::users::{routes as users_routes, UserService};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Schema bootstrap runs before the listener exists, so no request sees a half-built schema
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let app = build_app(pool, &config);

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let listener = bind_listener(socket_addr)?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Wire services, routes and the HTTP layer stack around a migrated pool
fn build_app(pool: SqlitePool, config: &Config) -> Router {
    let user_service = Arc::new(UserService::new(pool.clone()));
    let report_service = Arc::new(ReportService::new(pool.clone()));
    let alert_service = Arc::new(AlertService::new(pool));
    tracing::info!("Services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    Router::new()
        .merge(swagger)
        .merge(health_routes::routes())
        .merge(users_routes::routes(user_service))
        .merge(reports_routes::routes(report_service))
        .merge(alerts_routes::routes(alert_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::RequestIdV7))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::RequestSpan)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

fn bind_listener(socket_addr: std::net::SocketAddr) -> anyhow::Result<tokio::net::TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AppConfig, DatabaseConfig, SwaggerConfig};
    use crate::shared::test_helpers::test_pool;
    use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};

    fn test_config(swagger_credentials: Option<(&str, &str)>) -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
                max_request_body_size: 64 * 1024,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                acquire_timeout_secs: 5,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            swagger: SwaggerConfig {
                username: swagger_credentials.map(|(u, _)| u.to_string()),
                password: swagger_credentials.map(|(_, p)| p.to_string()),
                title: "MappingCrimeFrance API".to_string(),
                version: "0.1.0".to_string(),
                description: "test".to_string(),
            },
        }
    }

    async fn server(config: Config) -> TestServer {
        let app = build_app(test_pool().await, &config);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_full_scenario_through_one_app() {
        let server = server(test_config(None)).await;

        server.get("/").await.assert_status_ok();

        let register = server
            .post("/api/register")
            .json(&json!({
                "first_name": "A",
                "last_name": "B",
                "email": "a@b.com",
                "password": "secret"
            }))
            .await;
        register.assert_status_ok();
        assert_eq!(register.json::<Value>()["id"], 1);

        server
            .post("/api/reports")
            .json(&json!({
                "crime_type": "Vol",
                "date_time": "2024-06-01T08:15:00Z",
                "address": "Gare Saint-Charles",
                "postcode": "13001",
                "city": "Marseille",
                "latitude": 43.3027,
                "longitude": 5.3806
            }))
            .await
            .assert_status_ok();

        server
            .post("/api/alerts")
            .json(&json!({
                "email": "a@b.com",
                "center_lat": 43.3,
                "center_lng": 5.38,
                "radius_km": 1.5,
                "crime_types": []
            }))
            .await
            .assert_status_ok();

        let reports: Vec<Value> = server.get("/api/reports").await.json();
        let alerts: Vec<Value> = server.get("/api/alerts").await.json();
        assert_eq!(reports.len(), 1);
        assert_eq!(alerts[0]["crime_types"], json!([]));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let server = server(test_config(None)).await;

        let response = server
            .method(Method::OPTIONS, "/api/reports")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://example.org"),
            )
            .add_header(
                HeaderName::from_static("access-control-request-method"),
                HeaderValue::from_static("POST"),
            )
            .await;

        assert_eq!(
            response.header("access-control-allow-origin"),
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let server = server(test_config(None)).await;

        let response = server.get("/").await;
        assert!(response.maybe_header("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server(test_config(None)).await;

        let response = server
            .post("/api/login")
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = server(test_config(None)).await;

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: Value = response.json();
        assert!(doc["paths"]["/api/alerts"].is_object());
    }

    #[tokio::test]
    async fn test_swagger_basic_auth_when_configured() {
        let server = server(test_config(Some(("admin", "secret")))).await;

        server
            .get("/api-docs/openapi.json")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let authorization = format!("Basic {}", BASE64_STANDARD.encode("admin:secret"));
        server
            .get("/api-docs/openapi.json")
            .add_header(
                HeaderName::from_static("authorization"),
                HeaderValue::from_str(&authorization).unwrap(),
            )
            .await
            .assert_status_ok();

        // API routes stay public
        server.get("/api/alerts").await.assert_status_ok();
    }
}
