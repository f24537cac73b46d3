//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, loans, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Books
        books::list_books,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Members
        members::list_members,
        members::create_member,
        // Loans
        loans::list_loans,
        loans::borrow,
        loans::return_loan,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Members
            crate::models::member::Member,
            crate::models::member::MemberShort,
            crate::models::member::CreateMember,
            crate::models::member::RegisterMember,
            // Loans
            loans::BorrowRequest,
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "members", description = "Member management"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
