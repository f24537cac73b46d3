//! Authentication service: registration, login, password hashing

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::member::{Member, MemberClaims, RegisterMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new member with credentials
    pub async fn register(&self, request: RegisterMember) -> AppResult<Member> {
        if self.repository.members.email_exists(&request.email).await? {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;

        self.repository
            .members
            .create(&request.name, &request.email, Some(password_hash))
            .await
    }

    /// Authenticate a member by email and return a JWT token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, Member)> {
        let member = self
            .repository
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !self.verify_password(&member, password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.create_token_for_member(&member)?;

        Ok((token, member))
    }

    /// Create JWT token for a member
    fn create_token_for_member(&self, member: &Member) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = MemberClaims {
            sub: member.id.to_string(),
            member_id: member.id,
            email: member.email.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a member's password; members without credentials never match
    fn verify_password(&self, member: &Member, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = member.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
