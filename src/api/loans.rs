//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{BorrowLoan, Loan, LoanDetails},
};

use super::AuthenticatedMember;

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Book ID
    pub book_id: i32,
    /// Member ID
    pub member_id: i32,
    /// Loan duration in days, clamped to 1-30 (default 7)
    pub days: Option<i64>,
}

/// List all loans with book and member populated
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "All loans, active and returned", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.list().await?;
    Ok(Json(loans))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans/borrow",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Book unavailable"),
        (status = 404, description = "Member not found"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    AuthenticatedMember(_claims): AuthenticatedMember,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state
        .services
        .loans
        .borrow(BorrowLoan {
            book_id: request.book_id,
            member_id: request.member_id,
            days: request.days,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = LoanDetails),
        (status = 400, description = "Loan already returned"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedMember(_claims): AuthenticatedMember,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.return_loan(loan_id).await?;

    Ok(Json(loan))
}
