// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::risks::list_risks,
        crate::presentation::http::controllers::risks::get_risk,
        crate::presentation::http::controllers::risks::create_risk,
        crate::presentation::http::controllers::risks::update_risk,
        crate::presentation::http::controllers::risks::delete_risk,
        crate::presentation::http::controllers::audit::list_risk_audit,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::AuthResponse,
            crate::presentation::http::controllers::risks::CreateRiskRequest,
            crate::presentation::http::controllers::risks::UpdateRiskRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::RiskDto,
            crate::application::dto::AuditLogDto,
            crate::application::dto::PageMeta,
            crate::domain::risk::RiskStatus,
            crate::domain::risk::RiskSeverity,
            crate::domain::audit::AuditAction,
            crate::domain::user::Role
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Risks", description = "Risk register"),
        (name = "Audit", description = "Field-level change history"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Risk Register API",
        description = "Risk register with a field-level audit trail",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// `/openapi.json`, Swagger UI at `/docs` and Redoc at `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}
