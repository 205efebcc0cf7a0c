// tests/support/mocks/health.rs
use async_trait::async_trait;
use risk_register::application::{
    ApplicationResult, error::ApplicationError, ports::health::HealthCheck,
};

/// Store that is either always reachable or never.
pub struct FixedHealth {
    up: bool,
}

impl FixedHealth {
    pub const fn up() -> Self {
        Self { up: true }
    }

    pub const fn down() -> Self {
        Self { up: false }
    }
}

#[async_trait]
impl HealthCheck for FixedHealth {
    async fn ping(&self) -> ApplicationResult<()> {
        if self.up {
            Ok(())
        } else {
            Err(ApplicationError::infrastructure("connection refused"))
        }
    }
}
