// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::{AuditLogDto, DataEnvelope},
    queries::audit::ListEntityAuditQuery,
};
use crate::domain::risk::RISK_ENTITY_TYPE;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, PathParam, QueryParams};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditListParams {
    /// Maximum entries to return; defaults to 50, capped at 200.
    pub limit: Option<String>,
}

impl AuditListParams {
    fn limit(&self) -> Option<u32> {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/risks/{id}/audit",
    params(("id" = String, Path, description = "Risk id"), AuditListParams),
    responses(
        (status = 200, description = "Audit entries of the risk, newest first.", body = DataEnvelope<AuditLogDto>),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_risk_audit(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    PathParam(id): PathParam<String>,
    QueryParams(params): QueryParams<AuditListParams>,
) -> HttpResult<Json<DataEnvelope<AuditLogDto>>> {
    let query = ListEntityAuditQuery {
        entity_type: RISK_ENTITY_TYPE.to_string(),
        entity_id: id,
        limit: params.limit(),
    };

    state
        .services
        .audit_queries
        .list_by_entity(query)
        .await
        .into_http()
        .map(Json)
}
