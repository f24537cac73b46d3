//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::BookShort;
use super::member::MemberShort;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    /// NULL once the referenced book has been deleted
    pub book_id: Option<i32>,
    pub member_id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// Loan with book and member populated for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub book: Option<BookShort>,
    pub member: Option<MemberShort>,
    pub is_overdue: bool,
}

/// Borrow request passed to the loans service
#[derive(Debug, Deserialize)]
pub struct BorrowLoan {
    pub book_id: i32,
    pub member_id: i32,
    pub days: Option<i64>,
}
