use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::users::dtos::UserResponseDto;

/// Database model for a registered user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            age: u.age,
            email: u.email,
            address: u.address,
            postcode: u.postcode,
            city: u.city,
            created_at: u.created_at,
        }
    }
}
