mod get;
mod list;
mod service;

pub use list::ListRisksQuery;
pub use service::RiskQueryService;
