use crate::domain::risk::{Risk, RiskSeverity, RiskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner_id: String,
    pub status: RiskStatus,
    pub severity: RiskSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(
        default,
        with = "serde_time::date_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub review_date: Option<NaiveDate>,
    pub created_by: String,
    pub updated_by: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Risk> for RiskDto {
    fn from(risk: Risk) -> Self {
        Self {
            id: risk.id.into(),
            title: risk.title.into(),
            description: risk.description,
            owner_id: risk.owner_id.into(),
            status: risk.status,
            severity: risk.severity,
            category_id: risk.category_id.map(Into::into),
            review_date: risk.review_date,
            created_by: risk.created_by.into(),
            updated_by: risk.updated_by.into(),
            created_at: risk.created_at,
            updated_at: risk.updated_at,
        }
    }
}
