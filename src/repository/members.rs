//! Members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::Member,
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Get member by email (primary authentication lookup)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List all members
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(members)
    }

    /// Create a new member; the password, when present, is already hashed
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: Option<String>,
    ) -> AppResult<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, password)
            VALUES ($1, LOWER($2), $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }
}
