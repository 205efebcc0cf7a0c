mod create;
mod delete;
mod service;
mod update;

pub use create::CreateRiskCommand;
pub use service::RiskCommandService;
pub use update::UpdateRiskCommand;
