// src/application/services/mod.rs
pub mod audit_trail;

use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{risks::RiskCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{audit::AuditQueryService, risks::RiskQueryService, users::UserQueryService},
    },
    domain::{
        audit::AuditLogRepository,
        category::CategoryRepository,
        risk::{RiskReadRepository, RiskWriteRepository},
        user::UserRepository,
    },
};

pub use audit_trail::{AuditFailurePolicy, AuditTrail};

/// Store handles backing the services. Each is injected once at startup.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub risk_writes: Arc<dyn RiskWriteRepository>,
    pub risk_reads: Arc<dyn RiskReadRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub risk_commands: Arc<RiskCommandService>,
    pub risk_queries: Arc<RiskQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        audit_policy: AuditFailurePolicy,
    ) -> Self {
        let audit_trail = Arc::new(AuditTrail::new(
            Arc::clone(&repos.audit_logs),
            Arc::clone(&clock),
            audit_policy,
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));

        let risk_commands = Arc::new(RiskCommandService::new(
            Arc::clone(&repos.risk_writes),
            Arc::clone(&repos.risk_reads),
            Arc::clone(&repos.categories),
            audit_trail,
            Arc::clone(&clock),
        ));
        let risk_queries = Arc::new(RiskQueryService::new(Arc::clone(&repos.risk_reads)));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&repos.audit_logs)));

        Self {
            user_commands,
            user_queries,
            risk_commands,
            risk_queries,
            audit_queries,
            token_manager,
        }
    }

    /// Verifies a raw bearer token. Signature, format and expiry only; there is
    /// no server-side session to consult.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
