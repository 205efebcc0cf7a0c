// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Issues and verifies Ed25519-signed biscuit tokens carrying the caller's
/// id, email, role and validity window. Verification needs only the public key.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }
}

const TOKEN_CODE: &str = r"
    user({uid}, {email});
    role({urole});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
";

fn build_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> HashMap<String, Term> {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), subject.user_id.as_str().into());
    params.insert("email".to_string(), subject.email.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());
    params
}

fn build_and_serialize_biscuit(
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(TOKEN_CODE, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn ttl_seconds(ttl: Duration) -> i64 {
    ChronoDuration::from_std(ttl)
        .map(|d| d.num_seconds())
        .unwrap_or(i64::MAX)
        .max(0)
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let params = build_params(&subject, issued_at, expires_at);
        let token = build_and_serialize_biscuit(params, self.root.as_ref())?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: ttl_seconds(self.ttl),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|_| ApplicationError::unauthorized("invalid token"))?;

        // Token checks (validity window) run against the current time.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|_| ApplicationError::unauthorized("invalid token"))?;

        authorizer
            .authorize()
            .map_err(|_| ApplicationError::unauthorized("token expired or not yet valid"))?;

        let (facts, _, _, _) = authorizer.dump();
        crate::infrastructure::security::claims::parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    const KEY: &str = "c2b1f7a0d4e3b6a9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5";

    fn subject(role: Role) -> TokenSubject {
        TokenSubject {
            user_id: UserId::new("u-42").unwrap(),
            email: "member@example.com".into(),
            role,
        }
    }

    #[tokio::test]
    async fn issued_token_authenticates_with_same_identity() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(3600)).unwrap();
        let issued = manager.issue(subject(Role::Member)).await.unwrap();
        assert_eq!(issued.expires_in, 3600);

        let user = manager.authenticate(&issued.token).await.unwrap();
        assert_eq!(user.id.as_str(), "u-42");
        assert_eq!(user.email, "member@example.com");
        assert_eq!(user.role, Role::Member);
        assert!(user.expires_at > user.issued_at);
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(3600)).unwrap();
        let issued = manager.issue(subject(Role::Admin)).await.unwrap();
        let mid = issued.token.len() / 2;
        let replacement = if issued.token.as_bytes()[mid] == b'A' { "B" } else { "A" };
        let mut tampered = issued.token.clone();
        tampered.replace_range(mid..=mid, replacement);

        let err = manager.authenticate(&tampered).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
        let err = manager.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn token_from_another_key_is_unauthorized() {
        let issuer = BiscuitTokenManager::new(KEY, Duration::from_secs(3600)).unwrap();
        let other = BiscuitTokenManager::new(
            "0101010101010101010101010101010101010101010101010101010101010101",
            Duration::from_secs(3600),
        )
        .unwrap();
        let issued = issuer.issue(subject(Role::Admin)).await.unwrap();
        assert!(other.authenticate(&issued.token).await.is_err());
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let manager = BiscuitTokenManager::new(KEY, Duration::ZERO).unwrap();
        let issued = manager.issue(subject(Role::Admin)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let err = manager.authenticate(&issued.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[test]
    fn malformed_key_is_rejected() {
        assert!(BiscuitTokenManager::new("zz", Duration::from_secs(1)).is_err());
    }
}
