use crate::domain::audit::{AuditAction, AuditLog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub action: AuditAction,
    /// Field to value on create, field to `{from, to}` on update, absent on delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub changes: Option<serde_json::Value>,
    pub user_id: String,
    /// Absent once the acting user no longer exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            entity_type: log.entity.entity_type,
            entity_id: log.entity.entity_id,
            action: log.action,
            changes: log.changes,
            user_id: log.user_id.into(),
            user_name: log.user_name,
            created_at: log.created_at,
        }
    }
}
