// tests/support/helpers.rs
use super::mocks::{
    DummyPasswordHasher, DummyTokenManager, FixedHealth, InMemoryAuditRepo, InMemoryCategoryRepo,
    InMemoryRiskRepo, InMemoryUserRepo, SteppingClock,
};
use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
};
use risk_register::application::{
    ports::{health::HealthCheck, security::TokenManager},
    services::{ApplicationServices, AuditFailurePolicy, Repositories},
};
use risk_register::domain::{audit::AuditLogRepository, risk::RiskReadRepository, user::Role};
use risk_register::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const ADMIN_ID: &str = "u-admin";
pub const MEMBER_ID: &str = "u-member";

/// In-memory stores plus the knobs the tests turn before building a router.
pub struct TestContext {
    pub users: Arc<InMemoryUserRepo>,
    pub risks: Arc<InMemoryRiskRepo>,
    pub audit: Arc<InMemoryAuditRepo>,
    audit_port: Arc<dyn AuditLogRepository>,
    risk_reads: Option<Arc<dyn RiskReadRepository>>,
    categories: Arc<InMemoryCategoryRepo>,
    token_manager: Arc<dyn TokenManager>,
    health: Arc<dyn HealthCheck>,
    policy: AuditFailurePolicy,
}

impl TestContext {
    /// Seeds an admin (`u-admin`) and a member (`u-member`) and two categories.
    pub fn new() -> Self {
        let ctx = Self::without_users();
        ctx.users.seed(ADMIN_ID, "Alice Admin", Role::Admin);
        ctx.users.seed(MEMBER_ID, "Mia Member", Role::Member);
        ctx
    }

    pub fn without_users() -> Self {
        let users = Arc::new(InMemoryUserRepo::default());
        let audit = Arc::new(InMemoryAuditRepo::new(Arc::clone(&users)));
        Self {
            audit_port: audit.clone(),
            risk_reads: None,
            users,
            risks: Arc::new(InMemoryRiskRepo::default()),
            audit,
            categories: Arc::new(InMemoryCategoryRepo::with(&["cat-ops", "cat-security"])),
            token_manager: Arc::new(DummyTokenManager),
            health: Arc::new(FixedHealth::up()),
            policy: AuditFailurePolicy::BestEffort,
        }
    }

    pub fn with_audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_port = repo;
        self
    }

    /// Serves reads from `repo` while writes keep going to `self.risks`.
    pub fn with_risk_reads(mut self, repo: Arc<dyn RiskReadRepository>) -> Self {
        self.risk_reads = Some(repo);
        self
    }

    pub fn with_policy(mut self, policy: AuditFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_token_manager(mut self, token_manager: Arc<dyn TokenManager>) -> Self {
        self.token_manager = token_manager;
        self
    }

    pub fn with_health_check(mut self, health: Arc<dyn HealthCheck>) -> Self {
        self.health = health;
        self
    }

    pub fn services(&self) -> Arc<ApplicationServices> {
        let risk_reads: Arc<dyn RiskReadRepository> = match &self.risk_reads {
            Some(repo) => Arc::clone(repo),
            None => self.risks.clone(),
        };
        let repos = Repositories {
            users: self.users.clone(),
            categories: self.categories.clone(),
            risk_writes: self.risks.clone(),
            risk_reads,
            audit_logs: Arc::clone(&self.audit_port),
        };
        Arc::new(ApplicationServices::new(
            repos,
            Arc::new(DummyPasswordHasher),
            Arc::clone(&self.token_manager),
            Arc::new(SteppingClock::default()),
            self.policy,
        ))
    }

    pub fn router(&self) -> Router {
        let state = HttpState::new(self.services(), Arc::clone(&self.health));
        build_router_with_rate_limiter(state, false)
    }
}

/// Sends one request through the router and returns the status and the JSON
/// body (`Value::Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("expected a JSON body")
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(token), None).await
}

/// Creates a risk and returns its JSON representation.
pub async fn create_risk(app: &Router, token: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/api/v1/risks", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

/// Asserts the `{error, message}` shape used for every failure.
pub fn assert_error_body(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(
        body["error"].as_str(),
        expected.canonical_reason(),
        "unexpected error field: {body}"
    );
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected non-empty message: {body}"
    );
}
