// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, risks},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

pub fn build_router_with_rate_limiter(state: HttpState, enable_rate_limiter: bool) -> Router {
    let mut auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile));

    if enable_rate_limiter {
        match rate_limit_layer(state.auth_rate_limit) {
            Some(layer) => auth_routes = auth_routes.layer(layer),
            None => tracing::warn!("auth rate limiter disabled: invalid quota"),
        }
    }

    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(auth_routes)
        .route(
            "/api/v1/risks",
            get(risks::list_risks).post(risks::create_risk),
        )
        .route(
            "/api/v1/risks/{id}",
            get(risks::get_risk)
                .put(risks::update_risk)
                .delete(risks::delete_risk),
        )
        .route("/api/v1/risks/{id}/audit", get(audit::list_risk_audit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(values))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable.", body = StatusResponse),
        (status = 503, description = "Store unreachable.", body = StatusResponse)
    ),
    security([]),
    tag = "System"
)]
pub async fn health(
    Extension(state): Extension<HttpState>,
) -> (StatusCode, Json<StatusResponse>) {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "ok".into(),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse {
                    status: "down".into(),
                }),
            )
        }
    }
}
