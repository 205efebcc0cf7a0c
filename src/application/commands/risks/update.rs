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
        risk::{RiskId, RiskPatch, RiskTitle, parse_optional_review_date},
        user::UserId,
    },
};
use tracing::{debug, info};

/// Partial update. For `category_id` and `review_date`, `Some(None)` (or a
/// blank string) clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateRiskCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category_id: Option<Option<String>>,
    pub review_date: Option<Option<String>>,
}

impl UpdateRiskCommand {
    fn into_patch(self) -> ApplicationResult<RiskPatch> {
        Ok(RiskPatch {
            title: self.title.map(RiskTitle::new).transpose()?,
            description: self.description,
            owner_id: self.owner_id.map(UserId::new).transpose()?,
            status: parse_status(self.status)?,
            severity: parse_severity(self.severity)?,
            category_id: self
                .category_id
                .map(CategoryId::parse_optional)
                .transpose()?,
            review_date: self
                .review_date
                .map(parse_optional_review_date)
                .transpose()?,
        })
    }
}

impl RiskCommandService {
    /// Applies the supplied fields and records one `updated` entry carrying
    /// only the fields whose value changed. A request that changes nothing
    /// returns the stored risk untouched and records nothing.
    pub async fn update_risk(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        command: UpdateRiskCommand,
    ) -> ApplicationResult<RiskDto> {
        let id = RiskId::new(id)?;
        let mut risk = self.load(&id).await?;

        let patch = command.into_patch()?;
        if let Some(category_id) = &patch.category_id {
            self.ensure_category_exists(category_id.as_ref()).await?;
        }

        let changes = risk.apply(patch);
        if changes.is_empty() {
            debug!(risk_id = %id, "update carried no effective changes");
            return Ok(risk.into());
        }

        risk.touch(actor.id.clone(), self.clock.now());
        let updated = self.write_repo.update(&risk).await?;
        info!(
            risk_id = %id,
            user_id = %actor.id,
            fields = changes.len(),
            "risk updated"
        );

        self.audit
            .record_update(entity_ref(&id), changes, &actor.id)
            .await?;

        Ok(updated.into())
    }
}
