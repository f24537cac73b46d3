//! Member endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
};

use super::AuthenticatedMember;

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "List of members", body = Vec<Member>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.catalog.list_members().await?;
    Ok(Json(members))
}

/// Create a new member (staff operation, no credentials)
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    AuthenticatedMember(_claims): AuthenticatedMember,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    member
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.catalog.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
