// tests/e2e_auth.rs
use axum::{
    Router,
    http::{Method, StatusCode},
};
use risk_register::infrastructure::security::token::BiscuitTokenManager;
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};

mod support;

use support::{ADMIN_ID, TestContext, assert_error_body, send};

const SIGNING_KEY: &str = "4c6f72656d20697073756d20646f6c6f722073697420616d65742c20636f6e73";

async fn register(app: &Router, email: &str, password: &str, name: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": email, "password": password, "name": name })),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

fn token_of(body: &Value) -> String {
    body["token"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn first_registration_is_admin_and_later_ones_are_members() {
    let ctx = TestContext::without_users();
    let app = ctx.router();

    let (status, first) = register(&app, "Owner@Example.com", "correct horse", "Owner").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["user"]["role"], "admin");
    assert_eq!(first["user"]["email"], "owner@example.com");
    assert!(first["user"].get("password_hash").is_none());
    assert!(!token_of(&first).is_empty());

    let (status, second) = register(&app, "analyst@example.com", "correct horse", "Analyst").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["user"]["role"], "member");
}

#[tokio::test]
async fn registration_rejects_bad_input_and_duplicates() {
    let ctx = TestContext::without_users();
    let app = ctx.router();

    let (status, body) = register(&app, "not-an-email", "correct horse", "X").await;
    assert_error_body(status, &body, StatusCode::BAD_REQUEST);
    let (status, body) = register(&app, "a@example.com", "short", "X").await;
    assert_error_body(status, &body, StatusCode::BAD_REQUEST);
    let (status, body) = register(&app, "a@example.com", "correct horse", "  ").await;
    assert_error_body(status, &body, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "a@example.com", "correct horse", "A").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = register(&app, "A@example.com", "correct horse", "A again").await;
    assert_error_body(status, &body, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_and_profile_round_trip() {
    let ctx = TestContext::without_users();
    let app = ctx.router();
    register(&app, "pat@example.com", "correct horse", "Pat").await;

    let (status, body) = login(&app, "pat@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);
    let token = token_of(&body);

    let (status, profile) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["name"], "Pat");
    assert_eq!(profile["user"]["id"], body["user"]["id"]);
    assert!(profile["expires_in"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let ctx = TestContext::without_users();
    let app = ctx.router();
    register(&app, "pat@example.com", "correct horse", "Pat").await;

    let (status, wrong_password) = login(&app, "pat@example.com", "battery staple").await;
    assert_error_body(status, &wrong_password, StatusCode::UNAUTHORIZED);
    let (status, unknown) = login(&app, "nobody@example.com", "correct horse").await;
    assert_error_body(status, &unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown["message"]);
}

#[tokio::test]
async fn profile_requires_a_valid_bearer_token() {
    let ctx = TestContext::new();
    let app = ctx.router();

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", None, None).await;
    assert_error_body(status, &body, StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::util::ServiceExt::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some("nonsense"), None).await;
    assert_error_body(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signed_member_token_is_forbidden_from_admin_operations() {
    let manager = BiscuitTokenManager::new(SIGNING_KEY, Duration::from_secs(3600)).unwrap();
    let ctx = TestContext::new().with_token_manager(Arc::new(manager));
    let app = ctx.router();

    let (status, admin) = login(&app, &format!("{ADMIN_ID}@example.com"), "password123").await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = token_of(&admin);

    let (status, member) = register(&app, "mallory@example.com", "correct horse", "Mallory").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["user"]["role"], "member");
    let member_token = token_of(&member);

    let (status, risk) = send(
        &app,
        Method::POST,
        "/api/v1/risks",
        Some(&admin_token),
        Some(json!({ "title": "Insider threat", "owner_id": ADMIN_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/v1/risks/{}", risk["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&member_token), None).await;
    assert_error_body(status, &body, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/v1/risks", Some(&member_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn token_signed_with_another_key_is_rejected() {
    let ours = BiscuitTokenManager::new(SIGNING_KEY, Duration::from_secs(3600)).unwrap();
    let theirs = BiscuitTokenManager::new(
        "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
        Duration::from_secs(3600),
    )
    .unwrap();

    let foreign_app = TestContext::new()
        .with_token_manager(Arc::new(theirs))
        .router();
    let (_, foreign) = login(&foreign_app, &format!("{ADMIN_ID}@example.com"), "password123").await;
    let forged = token_of(&foreign);

    let app = TestContext::new().with_token_manager(Arc::new(ours)).router();
    let (status, body) = send(&app, Method::GET, "/api/v1/risks", Some(&forged), None).await;
    assert_error_body(status, &body, StatusCode::UNAUTHORIZED);
}
