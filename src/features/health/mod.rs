//! Root liveness check.

pub mod handlers;
pub mod routes;
