//! Geofenced alert subscriptions.
//!
//! Subscriptions are stored and listed; nothing evaluates them against new reports yet.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/alerts` | No | Subscribe an email to an area and crime types |
//! | GET | `/api/alerts` | No | List every subscription |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AlertService;
