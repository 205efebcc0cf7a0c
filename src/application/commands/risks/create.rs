use super::{
    RiskCommandService,
    service::{entity_ref, parse_severity, parse_status},
};
use crate::{
    application::{
        dto::{AuthenticatedUser, RiskDto},
        error::ApplicationResult,
    },
    domain::{
        category::CategoryId,
        risk::{NewRisk, RiskTitle, parse_optional_review_date},
        user::UserId,
    },
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CreateRiskCommand {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category_id: Option<String>,
    pub review_date: Option<String>,
}

impl RiskCommandService {
    /// Persists the risk, then records a `created` entry holding its initial fields.
    pub async fn create_risk(
        &self,
        actor: &AuthenticatedUser,
        command: CreateRiskCommand,
    ) -> ApplicationResult<RiskDto> {
        let new_risk = NewRisk {
            id: None,
            title: RiskTitle::new(command.title)?,
            description: command.description.unwrap_or_default(),
            owner_id: UserId::new(command.owner_id)?,
            status: parse_status(command.status)?.unwrap_or_default(),
            severity: parse_severity(command.severity)?.unwrap_or_default(),
            category_id: CategoryId::parse_optional(command.category_id)?,
            review_date: parse_optional_review_date(command.review_date)?,
            created_by: actor.id.clone(),
            created_at: self.clock.now(),
        };
        self.ensure_category_exists(new_risk.category_id.as_ref())
            .await?;

        let risk = self.write_repo.insert(new_risk).await?;
        info!(risk_id = %risk.id, user_id = %actor.id, "risk created");

        self.audit
            .record_create(entity_ref(&risk.id), risk.snapshot(), &actor.id)
            .await?;

        Ok(risk.into())
    }
}
