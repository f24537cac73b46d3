//! Catalog management service: books and members

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{normalize_isbn, Book, CreateBook, UpdateBook},
        member::{CreateMember, Member},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let isbn = normalize_isbn(book.isbn.clone());

        if let Some(ref isbn) = isbn {
            if self.repository.books.isbn_exists(isbn, None).await? {
                return Err(AppError::Validation(
                    "A book with this ISBN already exists".to_string(),
                ));
            }
        }

        self.repository.books.create(&book, isbn).await
    }

    /// Update an existing book (partial)
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        let isbn = normalize_isbn(book.isbn.clone());

        if let Some(ref isbn) = isbn {
            if self.repository.books.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::Validation(
                    "A book with this ISBN already exists".to_string(),
                ));
            }
        }

        self.repository.books.update(id, &book, isbn).await
    }

    /// Delete a book; active loans keep a dangling (NULL) book reference
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Create a member without credentials (staff-side registration)
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        if self.repository.members.email_exists(&member.email).await? {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        self.repository
            .members
            .create(&member.name, &member.email, None)
            .await
    }
}
