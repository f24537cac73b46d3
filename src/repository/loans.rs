//! Loans repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookShort,
        loan::{Loan, LoanDetails},
        member::MemberShort,
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

const DETAILS_QUERY: &str = r#"
    SELECT l.id, l.book_id, l.member_id, l.borrowed_at, l.due_at, l.returned_at,
           b.id AS b_id, b.title AS b_title, b.author AS b_author, b.isbn AS b_isbn,
           m.id AS m_id, m.name AS m_name, m.email AS m_email
    FROM loans l
    LEFT JOIN books b ON l.book_id = b.id
    LEFT JOIN members m ON l.member_id = m.id
"#;

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))
    }

    /// List all loans with book and member populated
    pub async fn list_details(&self) -> AppResult<Vec<LoanDetails>> {
        let rows = sqlx::query(&format!("{} ORDER BY l.borrowed_at", DETAILS_QUERY))
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(rows.iter().map(|row| row_to_details(row, now)).collect())
    }

    /// Get a single loan with book and member populated
    pub async fn details_by_id(&self, id: i32) -> AppResult<LoanDetails> {
        let row = sqlx::query(&format!("{} WHERE l.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        Ok(row_to_details(&row, Utc::now()))
    }

    /// Create a new loan
    pub async fn create(
        &self,
        book_id: i32,
        member_id: i32,
        borrowed_at: DateTime<Utc>,
        due_at: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, member_id, borrowed_at, due_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(borrowed_at)
        .bind(due_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Stamp a loan as returned
    pub async fn mark_returned(&self, id: i32, returned_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE loans SET returned_at = $2 WHERE id = $1")
            .bind(id)
            .bind(returned_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn row_to_details(row: &PgRow, now: DateTime<Utc>) -> LoanDetails {
    let due_at: DateTime<Utc> = row.get("due_at");
    let returned_at: Option<DateTime<Utc>> = row.get("returned_at");

    // LEFT JOIN: the book row is absent once the book has been deleted
    let book = row
        .get::<Option<i32>, _>("b_id")
        .map(|id| BookShort {
            id,
            title: row.get("b_title"),
            author: row.get("b_author"),
            isbn: row.get("b_isbn"),
        });

    let member = row
        .get::<Option<i32>, _>("m_id")
        .map(|id| MemberShort {
            id,
            name: row.get("m_name"),
            email: row.get("m_email"),
        });

    LoanDetails {
        id: row.get("id"),
        borrowed_at: row.get("borrowed_at"),
        due_at,
        returned_at,
        book,
        member,
        is_overdue: returned_at.is_none() && due_at < now,
    }
}
