//! Member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Hashed password (argon2); absent for staff-created members
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short member representation for loan listings and auth responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberShort {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberShort {
    fn from(member: Member) -> Self {
        MemberShort {
            id: member.id,
            name: member.name,
            email: member.email,
        }
    }
}

/// Create member request (staff-created, no credentials)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// JWT Claims for authenticated members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberClaims {
    pub sub: String,
    pub member_id: i32,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl MemberClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
