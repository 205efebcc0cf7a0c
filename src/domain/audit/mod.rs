pub mod changes;
pub mod entity;
pub mod repository;

pub use changes::{FieldChange, FieldChanges, FieldSnapshot};
pub use entity::{AuditAction, AuditLog, EntityRef, NewAuditLog};
pub use repository::AuditLogRepository;
