use super::RiskQueryService;
use crate::{
    application::{
        dto::RiskDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::risk::RiskId,
};

impl RiskQueryService {
    pub async fn get_risk(&self, id: &str) -> ApplicationResult<RiskDto> {
        let id = RiskId::new(id)?;
        let risk = self
            .read_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("risk '{id}' not found")))?;
        Ok(risk.into())
    }
}
