//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{MemberShort, RegisterMember},
};

/// Login request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token
    pub token: String,
    /// Authenticated member
    pub member: MemberShort,
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterMember,
    responses(
        (status = 201, description = "Member registered", body = MemberShort),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterMember>,
) -> AppResult<(StatusCode, Json<MemberShort>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let member = state.services.auth.register(request).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, member) = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        member: member.into(),
    }))
}
