//! API integration tests
//!
//! These run against a live server with a reachable database:
//! `cargo run`, then `cargo test -- --ignored`.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api";

/// Unique email per run so tests can be re-executed against the same database
fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}-{}@example.org", prefix, nanos)
}

/// Register a fresh member and log in; returns (token, member_id)
async fn register_and_login(client: &Client, prefix: &str) -> (String, i64) {
    let email = unique_email(prefix);

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Member",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse register response");
    let member_id = body["id"].as_i64().expect("No member ID");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token in response").to_string();

    (token, member_id)
}

/// Create a book and return its ID
async fn create_book(client: &Client, token: &str, title: &str, copies: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "copies": copies
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book ID")
}

/// Fetch the current copy count of a book from the public listing
async fn book_copies(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send list books request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse books response");
    body.as_array()
        .expect("Books response is not an array")
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .expect("Book not in listing")["copies"]
        .as_i64()
        .expect("No copies field")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let (token, _member_id) = register_and_login(&client, "login").await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = Client::new();
    let email = unique_email("dup");

    for expected_status in [201, 400] {
        let response = client
            .post(format!("{}/auth/register", BASE_URL))
            .json(&json!({
                "name": "Dup Member",
                "email": email,
                "password": "password123"
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), expected_status);
    }
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let client = Client::new();
    let email = unique_email("wrongpass");

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Member",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "not-the-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_write() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "No Auth",
            "author": "Nobody"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_cycle() {
    let client = Client::new();
    let (token, member_id) = register_and_login(&client, "cycle").await;
    let book_id = create_book(&client, &token, "Single Copy", 1).await;

    // Borrow with an out-of-range duration; the server clamps it to 30 days
    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id,
            "days": 90
        }))
        .send()
        .await
        .expect("Failed to send borrow request");

    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse loan response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let borrowed_at: DateTime<Utc> = loan["borrowed_at"]
        .as_str()
        .expect("No borrowed_at")
        .parse()
        .expect("Bad borrowed_at");
    let due_at: DateTime<Utc> = loan["due_at"]
        .as_str()
        .expect("No due_at")
        .parse()
        .expect("Bad due_at");
    assert_eq!((due_at - borrowed_at).num_days(), 30);

    // The only copy is now out
    assert_eq!(book_copies(&client, book_id).await, 0);

    // A second borrow must be refused
    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send borrow request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error response");
    assert_eq!(body["message"], "Book unavailable");

    // Return the book
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send return request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse return response");
    assert!(body["returned_at"].is_string());

    // Net zero over the borrow+return cycle
    assert_eq!(book_copies(&client, book_id).await, 1);

    // Double return must be refused
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send return request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error response");
    assert_eq!(body["message"], "Loan already returned");
}

#[tokio::test]
#[ignore]
async fn test_borrow_unavailable_book() {
    let client = Client::new();
    let (token, member_id) = register_and_login(&client, "unavailable").await;
    let book_id = create_book(&client, &token, "Out of Stock", 0).await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send borrow request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error response");
    assert_eq!(body["message"], "Book unavailable");
}

#[tokio::test]
#[ignore]
async fn test_list_loans_populated() {
    let client = Client::new();
    let (token, member_id) = register_and_login(&client, "list").await;
    let book_id = create_book(&client, &token, "Listed Book", 2).await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send borrow request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send list loans request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse loans response");
    let loan = body
        .as_array()
        .expect("Loans response is not an array")
        .iter()
        .find(|l| l["book"]["id"].as_i64() == Some(book_id))
        .expect("Loan not in listing");

    assert_eq!(loan["book"]["title"], "Listed Book");
    assert_eq!(loan["member"]["id"].as_i64(), Some(member_id));
    assert_eq!(loan["is_overdue"], false);
}

#[tokio::test]
#[ignore]
async fn test_route_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/nope", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Route not found");
}
