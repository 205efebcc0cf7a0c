use crate::domain::errors::DomainResult;
use crate::domain::risk::entity::{NewRisk, Risk};
use crate::domain::risk::query::{RiskListQuery, RiskPage};
use crate::domain::risk::value_objects::RiskId;
use async_trait::async_trait;

#[async_trait]
pub trait RiskWriteRepository: Send + Sync {
    async fn insert(&self, risk: NewRisk) -> DomainResult<Risk>;
    /// Full-row update keyed by id. A missing row is `NotFound`.
    async fn update(&self, risk: &Risk) -> DomainResult<Risk>;
    /// A missing row is `NotFound`.
    async fn delete(&self, id: &RiskId) -> DomainResult<()>;
}

#[async_trait]
pub trait RiskReadRepository: Send + Sync {
    async fn find_by_id(&self, id: &RiskId) -> DomainResult<Option<Risk>>;
    async fn list(&self, query: &RiskListQuery) -> DomainResult<RiskPage>;
}
