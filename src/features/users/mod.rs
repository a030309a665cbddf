//! User accounts: registration and credential check.
//!
//! Login only validates credentials and echoes the account back; no session or
//! token is issued.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/register` | No | Create an account |
//! | POST | `/api/login` | No | Check email + password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
