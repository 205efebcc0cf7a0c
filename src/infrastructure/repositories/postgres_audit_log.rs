use super::map_sqlx;
use crate::domain::audit::{AuditLog, AuditLogRepository, EntityRef, NewAuditLog};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: String,
    entity_type: String,
    entity_id: String,
    action: String,
    changes: Option<Json<Value>>,
    user_id: String,
    user_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            entity: EntityRef::new(row.entity_type, row.entity_id),
            action: row.action.parse()?,
            changes: row.changes.map(|Json(value)| value),
            user_id: UserId::new(row.user_id)?,
            user_name: row.user_name.filter(|name| !name.is_empty()),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO audit_logs (id, entity_type, entity_id, action, changes, user_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&id)
        .bind(&log.entity.entity_type)
        .bind(&log.entity.entity_id)
        .bind(log.action.as_str())
        .bind(log.changes.as_ref().map(Json))
        .bind(log.user_id.as_str())
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(AuditLog {
            id,
            entity: log.entity,
            action: log.action,
            changes: log.changes,
            user_id: log.user_id,
            user_name: None,
            created_at: log.created_at,
        })
    }

    async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT a.id, a.entity_type, a.entity_id, a.action, a.changes, a.user_id,
                    u.name AS user_name, a.created_at
             FROM audit_logs a
             LEFT JOIN users u ON u.id = a.user_id
             WHERE a.entity_type = $1 AND a.entity_id = $2
             ORDER BY a.created_at DESC, a.seq DESC
             LIMIT $3",
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(AuditLog::try_from).collect()
    }
}
