//! Citizen crime reports and their media attachments.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | No | Submit a report |
//! | GET | `/api/reports` | No | List every report with its attachments |
//!
//! Attachments are written through [`ReportService::add_attachment`] only; there is
//! no upload endpoint.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
