// tests/support/mocks/mod.rs
pub mod health;
pub mod repos;
pub mod security;
pub mod time;

pub use health::FixedHealth;
pub use repos::{
    FailingAuditRepo, InMemoryAuditRepo, InMemoryCategoryRepo, InMemoryRiskRepo,
    InMemoryUserRepo, StaleRiskReads,
};
pub use security::{ADMIN_TOKEN, DummyPasswordHasher, DummyTokenManager, MEMBER_TOKEN};
pub use time::{SteppingClock, fixed_now};
