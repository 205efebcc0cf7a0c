// src/presentation/http/controllers/risks.rs
use crate::application::{
    commands::risks::{CreateRiskCommand, UpdateRiskCommand},
    dto::{Page, RiskDto},
    queries::risks::ListRisksQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, JsonBody, PathParam, QueryParams};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

/// Query string of the list endpoint. Everything arrives as text so that
/// unparsable paging values fall back to defaults instead of failing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RiskListParams {
    /// 1-based page number; defaults to 1.
    pub page: Option<String>,
    /// Page size in 1..=100; anything else becomes 20.
    pub limit: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// One of title, status, severity, category, review_date, updated_at, created_at.
    /// `category` orders by category name.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category_id: Option<String>,
    pub owner_id: Option<String>,
}

fn lenient_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

impl From<RiskListParams> for ListRisksQuery {
    fn from(params: RiskListParams) -> Self {
        Self {
            page: lenient_number(params.page.as_deref()),
            limit: lenient_number(params.limit.as_deref()),
            search: params.search,
            sort: params.sort,
            order: params.order,
            status: params.status,
            severity: params.severity,
            category_id: params.category_id,
            owner_id: params.owner_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRiskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: String,
    /// Defaults to `open`.
    #[serde(default)]
    pub status: Option<String>,
    /// Defaults to `medium`.
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub review_date: Option<String>,
}

impl From<CreateRiskRequest> for CreateRiskCommand {
    fn from(req: CreateRiskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            owner_id: req.owner_id,
            status: req.status,
            severity: req.severity,
            category_id: req.category_id,
            review_date: req.review_date,
        }
    }
}

/// Partial update. Omitted fields are left alone; `null` clears
/// `category_id` and `review_date`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRiskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub category_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub review_date: Option<Option<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateRiskRequest> for UpdateRiskCommand {
    fn from(req: UpdateRiskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            owner_id: req.owner_id,
            status: req.status,
            severity: req.severity,
            category_id: req.category_id,
            review_date: req.review_date,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/risks",
    params(RiskListParams),
    responses(
        (status = 200, description = "One page of matching risks.", body = Page<RiskDto>),
        (status = 400, description = "Unknown status or severity filter.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Risks"
)]
pub async fn list_risks(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    QueryParams(params): QueryParams<RiskListParams>,
) -> HttpResult<Json<Page<RiskDto>>> {
    state
        .services
        .risk_queries
        .list_risks(params.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/risks/{id}",
    params(("id" = String, Path, description = "Risk id")),
    responses(
        (status = 200, description = "The risk.", body = RiskDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 404, description = "No such risk.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Risks"
)]
pub async fn get_risk(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    PathParam(id): PathParam<String>,
) -> HttpResult<Json<RiskDto>> {
    state
        .services
        .risk_queries
        .get_risk(&id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/risks",
    request_body = CreateRiskRequest,
    responses(
        (status = 201, description = "Risk created.", body = RiskDto),
        (status = 400, description = "Invalid input or unknown category.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Risks"
)]
pub async fn create_risk(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    JsonBody(payload): JsonBody<CreateRiskRequest>,
) -> HttpResult<(StatusCode, Json<RiskDto>)> {
    let risk = state
        .services
        .risk_commands
        .create_risk(&user, payload.into())
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(risk)))
}

#[utoipa::path(
    put,
    path = "/api/v1/risks/{id}",
    params(("id" = String, Path, description = "Risk id")),
    request_body = UpdateRiskRequest,
    responses(
        (status = 200, description = "The risk after the update.", body = RiskDto),
        (status = 400, description = "Invalid input or unknown category.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 404, description = "No such risk.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Risks"
)]
pub async fn update_risk(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    PathParam(id): PathParam<String>,
    JsonBody(payload): JsonBody<UpdateRiskRequest>,
) -> HttpResult<Json<RiskDto>> {
    state
        .services
        .risk_commands
        .update_risk(&user, &id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/risks/{id}",
    params(("id" = String, Path, description = "Risk id")),
    responses(
        (status = 204, description = "Risk deleted."),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin.", body = ErrorResponse),
        (status = 404, description = "No such risk.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Risks"
)]
pub async fn delete_risk(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    PathParam(id): PathParam<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .risk_commands
        .delete_risk(&user, &id)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
