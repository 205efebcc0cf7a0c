use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::EntityRef,
        category::{CategoryId, CategoryRepository},
        risk::{
            RISK_ENTITY_TYPE, Risk, RiskId, RiskReadRepository, RiskSeverity, RiskStatus,
            RiskWriteRepository,
        },
    },
};

pub struct RiskCommandService {
    pub(super) write_repo: Arc<dyn RiskWriteRepository>,
    pub(super) read_repo: Arc<dyn RiskReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) audit: Arc<AuditTrail>,
    pub(super) clock: Arc<dyn Clock>,
}

impl RiskCommandService {
    pub fn new(
        write_repo: Arc<dyn RiskWriteRepository>,
        read_repo: Arc<dyn RiskReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        audit: Arc<AuditTrail>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            category_repo,
            audit,
            clock,
        }
    }

    pub(super) async fn ensure_category_exists(
        &self,
        category_id: Option<&CategoryId>,
    ) -> ApplicationResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        if self.category_repo.exists(category_id).await? {
            Ok(())
        } else {
            Err(ApplicationError::validation(format!(
                "category '{category_id}' does not exist"
            )))
        }
    }

    pub(super) async fn load(&self, id: &RiskId) -> ApplicationResult<Risk> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("risk '{id}' not found")))
    }
}

pub(super) fn entity_ref(id: &RiskId) -> EntityRef {
    EntityRef::new(RISK_ENTITY_TYPE, id.as_str())
}

/// Blank input means "not supplied".
pub(super) fn parse_status(raw: Option<String>) -> ApplicationResult<Option<RiskStatus>> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            Ok(Some(value.trim().parse::<RiskStatus>()?))
        }
        _ => Ok(None),
    }
}

/// Blank input means "not supplied".
pub(super) fn parse_severity(raw: Option<String>) -> ApplicationResult<Option<RiskSeverity>> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            Ok(Some(value.trim().parse::<RiskSeverity>()?))
        }
        _ => Ok(None),
    }
}
