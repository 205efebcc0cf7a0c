// tests/support/mocks/security.rs
use super::time::fixed_now;
use async_trait::async_trait;
use chrono::Duration;
use risk_register::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use risk_register::domain::user::{Role, UserId};

pub const ADMIN_TOKEN: &str = "admin:u-admin";
pub const MEMBER_TOKEN: &str = "member:u-member";

/// Reversible "hash" so tests can run without argon2 cost.
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<bool> {
        Ok(expected_hash == format!("hashed:{password}"))
    }
}

/// Tokens are plain `<role>:<user id>` strings.
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = fixed_now();
        Ok(AuthTokenDto {
            token: format!("{}:{}", subject.role, subject.user_id),
            issued_at,
            expires_at: issued_at + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        let (role, id) = token.split_once(':').ok_or_else(invalid)?;
        let role: Role = role.parse().map_err(|_| invalid())?;
        let id = UserId::new(id).map_err(|_| invalid())?;
        let now = fixed_now();
        Ok(AuthenticatedUser {
            email: format!("{id}@example.com"),
            id,
            role,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }
}
