use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{LoginRequestDto, RegisterUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::shared::password;

const EMAIL_TAKEN: &str = "Un compte existe déjà avec cet email.";
const INVALID_CREDENTIALS: &str = "Identifiants invalides.";

/// Well-formed Argon2id hash that matches no password. Unknown emails are verified
/// against it so both login failure paths cost the same.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Service for account registration and login
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account
    ///
    /// Fails with `Conflict` when the email is already registered, including the case
    /// where a concurrent registration wins the race between the lookup and the insert.
    pub async fn register(&self, dto: RegisterUserDto) -> Result<UserResponseDto> {
        if self.find_by_email(&dto.email).await?.is_some() {
            tracing::info!("Registration refused, email already registered");
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let plaintext = dto.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self.insert_user(&dto, &password_hash).await?;

        tracing::info!("User registered: id={}", user.id);

        Ok(user.into())
    }

    /// Check credentials and return the matching account
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<UserResponseDto> {
        let user = self.find_by_email(&dto.email).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_PASSWORD_HASH.to_string());
        let plaintext = dto.password;

        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
                .await
                .map_err(|e| {
                    AppError::Internal(format!("Password verification task failed: {}", e))
                })?;

        match user {
            Some(user) if verified => {
                tracing::info!("User logged in: id={}", user.id);
                Ok(user.into())
            }
            _ => Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, age, email, password_hash,
                   address, postcode, city, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert_user(&self, dto: &RegisterUserDto, password_hash: &str) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                first_name, last_name, age, email, password_hash,
                address, postcode, city, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, age, email, password_hash,
                      address, postcode, city, created_at
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.age)
        .bind(&dto.email)
        .bind(password_hash)
        .bind(&dto.address)
        .bind(&dto.postcode)
        .bind(&dto.city)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database);

        match result {
            Err(e) if e.is_unique_violation() => {
                tracing::info!("Registration lost a race on the email unique index");
                Err(AppError::Conflict(EMAIL_TAKEN.to_string()))
            }
            Err(e) => {
                tracing::error!("Failed to insert user: {:?}", e);
                Err(e)
            }
            Ok(user) => Ok(user),
        }
    }
}
