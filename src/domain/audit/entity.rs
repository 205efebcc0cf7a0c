// src/domain/audit/entity.rs
use crate::domain::audit::changes::{FieldChanges, FieldSnapshot};
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(AuditAction::Created),
            "updated" => Ok(AuditAction::Updated),
            "deleted" => Ok(AuditAction::Deleted),
            other => Err(DomainError::Validation(format!(
                "unknown audit action '{other}'"
            ))),
        }
    }
}

/// The (type, id) pair an audit entry is filed under. There is no foreign key
/// behind it, so entries outlive the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.entity_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub entity: EntityRef,
    pub action: AuditAction,
    pub changes: Option<Value>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewAuditLog {
    pub fn created(
        entity: EntityRef,
        snapshot: FieldSnapshot,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity,
            action: AuditAction::Created,
            changes: Some(snapshot.into_json()),
            user_id,
            created_at,
        }
    }

    pub fn updated(
        entity: EntityRef,
        changes: FieldChanges,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity,
            action: AuditAction::Updated,
            changes: Some(changes.into_json()),
            user_id,
            created_at,
        }
    }

    pub fn deleted(entity: EntityRef, user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            entity,
            action: AuditAction::Deleted,
            changes: None,
            user_id,
            created_at,
        }
    }
}

/// A persisted audit entry as read back, joined with the acting user's
/// display name when that user still exists.
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: String,
    pub entity: EntityRef,
    pub action: AuditAction,
    pub changes: Option<Value>,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
