mod list;
mod service;

pub use list::{
    DEFAULT_AUDIT_LIMIT, ListEntityAuditQuery, MAX_AUDIT_LIMIT, normalize_limit,
};
pub use service::AuditQueryService;
