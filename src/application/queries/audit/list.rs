use super::AuditQueryService;
use crate::application::{
    dto::{AuditLogDto, DataEnvelope},
    error::ApplicationResult,
};

pub const DEFAULT_AUDIT_LIMIT: u32 = 50;
pub const MAX_AUDIT_LIMIT: u32 = 200;

pub struct ListEntityAuditQuery {
    pub entity_type: String,
    pub entity_id: String,
    pub limit: Option<u32>,
}

/// Missing or zero means the default; anything above the cap is clamped.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_AUDIT_LIMIT,
        Some(limit) => limit.min(MAX_AUDIT_LIMIT),
    }
}

impl AuditQueryService {
    /// History of one entity, newest first. The entity itself may no longer
    /// exist; its entries are still returned.
    pub async fn list_by_entity(
        &self,
        query: ListEntityAuditQuery,
    ) -> ApplicationResult<DataEnvelope<AuditLogDto>> {
        let limit = normalize_limit(query.limit);
        let entries = self
            .repo
            .list_by_entity(&query.entity_type, &query.entity_id, limit)
            .await?;
        Ok(entries
            .into_iter()
            .map(AuditLogDto::from)
            .collect::<Vec<_>>()
            .into())
    }
}
