//! Loan management service

use chrono::{Duration, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::loan::{BorrowLoan, Loan, LoanDetails},
    repository::Repository,
};

/// Bounds on the requested loan duration, in days
const MIN_LOAN_DAYS: i64 = 1;
const MAX_LOAN_DAYS: i64 = 30;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// List all loans with book and member populated
    pub async fn list(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_details().await
    }

    /// Borrow a book: take one copy off the shelf and open a loan
    pub async fn borrow(&self, request: BorrowLoan) -> AppResult<Loan> {
        // Verify member exists
        self.repository.members.get_by_id(request.member_id).await?;

        let book = self.repository.books.find_by_id(request.book_id).await?;
        let available = book.map(|b| b.copies >= 1).unwrap_or(false);
        if !available {
            return Err(AppError::BusinessRule("Book unavailable".to_string()));
        }

        // Two independent writes: copies first, then the loan itself.
        self.repository.books.decrement_copies(request.book_id).await?;

        let borrowed_at = Utc::now();
        let days = clamp_days(request.days, self.config.default_days);
        let due_at = borrowed_at + Duration::days(days);

        let loan = self
            .repository
            .loans
            .create(request.book_id, request.member_id, borrowed_at, due_at)
            .await?;

        tracing::info!(
            loan_id = loan.id,
            book_id = request.book_id,
            member_id = request.member_id,
            days,
            "Loan created"
        );

        Ok(loan)
    }

    /// Return a borrowed book: stamp the loan and put the copy back
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;

        if loan.returned_at.is_some() {
            return Err(AppError::BusinessRule("Loan already returned".to_string()));
        }

        let returned_at = Utc::now();
        self.repository.loans.mark_returned(loan_id, returned_at).await?;

        // The book may have been deleted while on loan; skip the shelf update then.
        if let Some(book_id) = loan.book_id {
            self.repository.books.increment_copies(book_id).await?;
        }

        tracing::info!(loan_id, "Loan returned");

        self.repository.loans.details_by_id(loan_id).await
    }
}

/// Requested duration clamped to [MIN_LOAN_DAYS, MAX_LOAN_DAYS]; the
/// configured default applies when the request names none.
fn clamp_days(days: Option<i64>, default_days: i64) -> i64 {
    days.unwrap_or(default_days)
        .clamp(MIN_LOAN_DAYS, MAX_LOAN_DAYS)
}
