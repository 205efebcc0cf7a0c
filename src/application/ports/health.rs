// src/application/ports/health.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Liveness of the backing store.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> ApplicationResult<()>;
}
