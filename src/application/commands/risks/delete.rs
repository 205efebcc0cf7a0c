use super::{RiskCommandService, service::entity_ref};
use crate::{
    application::{
        authorization::ensure_role, dto::AuthenticatedUser, error::ApplicationResult,
    },
    domain::{risk::RiskId, user::Role},
};
use tracing::info;

impl RiskCommandService {
    /// Admin only. The `deleted` entry is written before the row is removed,
    /// so a delete that fails afterwards leaves an orphan entry behind.
    pub async fn delete_risk(&self, actor: &AuthenticatedUser, id: &str) -> ApplicationResult<()> {
        ensure_role(actor, Role::Admin)?;
        let id = RiskId::new(id)?;
        self.load(&id).await?;

        self.audit.record_delete(entity_ref(&id), &actor.id).await?;
        self.write_repo.delete(&id).await?;
        info!(risk_id = %id, user_id = %actor.id, "risk deleted");
        Ok(())
    }
}
