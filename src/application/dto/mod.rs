pub mod audit;
pub mod auth;
pub mod pagination;
pub mod risks;
pub mod serde_time;
pub mod users;

pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::{DataEnvelope, Page, PageMeta};
pub use risks::RiskDto;
pub use users::{UserDto, UserProfileDto};
