use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{LoginRequestDto, RegisterUserDto, UserResponseDto};
use crate::features::users::services::UserService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterUserDto,
    responses(
        (status = 200, description = "Account created", body = UserResponseDto),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Missing or mistyped fields")
    ),
    tag = "users"
)]
pub async fn register(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<RegisterUserDto>,
) -> Result<Json<UserResponseDto>> {
    let user = service.register(dto).await?;
    Ok(Json(user))
}

/// Check credentials
///
/// Returns the account on success. No token is issued.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Credentials valid", body = UserResponseDto),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "users"
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<UserResponseDto>> {
    let user = service.login(dto).await?;
    Ok(Json(user))
}
