// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_category;
mod postgres_risk;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_risk::{PostgresRiskReadRepository, PostgresRiskWriteRepository};
pub use postgres_user::PostgresUserRepository;
