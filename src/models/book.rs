//! Book (catalog) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// ISBN, unique when present
    pub isbn: Option<String>,
    /// Number of physical copies available for borrowing
    pub copies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short book representation embedded in loan listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Copies cannot be negative"))]
    pub copies: Option<i32>,
}

/// Update book request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Copies cannot be negative"))]
    pub copies: Option<i32>,
}

/// Normalize an optional ISBN: trimmed, blank collapses to None so that
/// "no ISBN" never trips the unique constraint.
pub fn normalize_isbn(isbn: Option<String>) -> Option<String> {
    isbn.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_isbn_collapses_to_none() {
        assert_eq!(normalize_isbn(None), None);
        assert_eq!(normalize_isbn(Some("".to_string())), None);
        assert_eq!(normalize_isbn(Some("   ".to_string())), None);
    }

    #[test]
    fn isbn_is_trimmed() {
        assert_eq!(
            normalize_isbn(Some(" 978-0-00-000000-0 ".to_string())),
            Some("978-0-00-000000-0".to_string())
        );
    }
}
