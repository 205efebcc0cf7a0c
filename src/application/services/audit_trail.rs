use std::{str::FromStr, sync::Arc};

use tracing::warn;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        audit::{AuditLogRepository, EntityRef, FieldChanges, FieldSnapshot, NewAuditLog},
        user::UserId,
    },
};

/// What a failed audit write does to the request that triggered it. Creates
/// and updates are already committed when the entry is written; a delete is
/// recorded first and does not proceed under `Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFailurePolicy {
    /// Log the lost entry at `warn` and report success.
    #[default]
    BestEffort,
    /// Surface the failure to the caller as an infrastructure error.
    Strict,
}

impl FromStr for AuditFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown audit failure policy '{other}' (expected best_effort or strict)"
            )),
        }
    }
}

pub struct AuditTrail {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
    policy: AuditFailurePolicy,
}

impl AuditTrail {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        clock: Arc<dyn Clock>,
        policy: AuditFailurePolicy,
    ) -> Self {
        Self {
            repo,
            clock,
            policy,
        }
    }

    pub async fn record_create(
        &self,
        entity: EntityRef,
        snapshot: FieldSnapshot,
        actor: &UserId,
    ) -> ApplicationResult<()> {
        let entry = NewAuditLog::created(entity, snapshot, actor.clone(), self.clock.now());
        self.write(entry).await
    }

    /// An empty diff writes nothing.
    pub async fn record_update(
        &self,
        entity: EntityRef,
        changes: FieldChanges,
        actor: &UserId,
    ) -> ApplicationResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let entry = NewAuditLog::updated(entity, changes, actor.clone(), self.clock.now());
        self.write(entry).await
    }

    pub async fn record_delete(&self, entity: EntityRef, actor: &UserId) -> ApplicationResult<()> {
        let entry = NewAuditLog::deleted(entity, actor.clone(), self.clock.now());
        self.write(entry).await
    }

    async fn write(&self, entry: NewAuditLog) -> ApplicationResult<()> {
        let Err(err) = self.repo.insert(entry.clone()).await else {
            return Ok(());
        };

        // Enough to rebuild the entry by hand from the logs.
        warn!(
            error = %err,
            entity = %entry.entity,
            action = %entry.action,
            user_id = %entry.user_id,
            created_at = %entry.created_at.to_rfc3339(),
            changes = ?entry.changes,
            "failed to record audit entry"
        );

        match self.policy {
            AuditFailurePolicy::BestEffort => Ok(()),
            AuditFailurePolicy::Strict => Err(ApplicationError::infrastructure(format!(
                "failed to record audit entry for {}",
                entry.entity
            ))),
        }
    }
}
