use axum::{routing::get, Router};

use crate::features::health::handlers;

pub fn routes() -> Router {
    Router::new().route("/", get(handlers::root))
}
