use crate::domain::audit::entity::{AuditLog, NewAuditLog};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Append-only: entries are never updated or removed.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog>;

    /// Newest first; ties on `created_at` resolve to the later insert first.
    async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>>;
}
