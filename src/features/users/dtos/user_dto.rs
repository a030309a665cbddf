use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for account registration
///
/// Fields are stored as given; the only constraint is that the email is not taken.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserDto {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub email: String,
    /// Plaintext password, only ever accepted here
    pub password: String,

    pub address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
}

/// Request DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub email: String,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}
