// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    ClaimsContext::from_facts(facts).into_authenticated_user()
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = Self::default();
        for fact in facts {
            ctx.apply_predicate(&fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Str(id), Term::Str(email)]) => {
                self.user_id = Some(id.clone());
                self.email = Some(email.clone());
            }
            ("role", [Term::Str(role)]) => {
                self.role = role.parse().ok();
            }
            ("issued_at", [Term::Date(seconds)]) => {
                self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            ("expires_at", [Term::Date(seconds)]) => {
                self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(*seconds));
            }
            _ => {}
        }
    }

    fn into_authenticated_user(self) -> ApplicationResult<AuthenticatedUser> {
        let missing = |claim: &str| ApplicationError::unauthorized(format!("missing {claim}"));

        let user_id = self.user_id.ok_or_else(|| missing("user id"))?;
        let email = self.email.ok_or_else(|| missing("email"))?;
        let role = self.role.ok_or_else(|| missing("role"))?;
        let issued_at = self.issued_at.ok_or_else(|| missing("issued_at"))?;
        let expires_at = self.expires_at.ok_or_else(|| missing("expires_at"))?;

        let id = UserId::new(user_id)
            .map_err(|_| ApplicationError::unauthorized("invalid user id claim"))?;

        Ok(AuthenticatedUser {
            id,
            email,
            role,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
        })
    }
}
