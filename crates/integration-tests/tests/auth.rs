//! Integration tests for registration, login, and `/me`.

use reqwest::StatusCode;
use serde_json::{Value, json};

use quills_integration_tests::{TestContext, unique_email};

async fn post_json(ctx: &TestContext, path: &str, body: Value) -> reqwest::Response {
    ctx.client
        .post(ctx.users(path))
        .json(&body)
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let ctx = TestContext::new().await;
    let email = unique_email("mixedcase");
    let noisy = format!("  {} ", email.to_uppercase());

    let response = ctx.register("Ada Lovelace", &noisy, "password123").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["user"]["email"], email);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_duplicate_email_any_casing_conflicts() {
    let ctx = TestContext::new().await;
    let email = unique_email("dup");

    let first = ctx.register("First", &email, "password123").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = ctx
        .register("Second", &email.to_uppercase(), "password123")
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.expect("body");
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_registration_validation() {
    let ctx = TestContext::new().await;

    // Name too short after trimming
    let response = post_json(
        &ctx,
        "/auth/register",
        json!({ "name": " a ", "email": unique_email("v"), "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Name too short");

    // Email without @
    let response = post_json(
        &ctx,
        "/auth/register",
        json!({ "name": "Ada", "email": "not-an-email", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Invalid email");

    // Password too short
    let response = post_json(
        &ctx,
        "/auth/register",
        json!({ "name": "Ada", "email": unique_email("v"), "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Password must be 6-128 chars");
}

#[tokio::test]
async fn test_registration_accepts_minimal_email() {
    let ctx = TestContext::new().await;

    // Only the @ is required; a bare local part or domain still registers.
    let email = format!("edge-{}@", uuid::Uuid::new_v4().simple());
    let response = post_json(
        &ctx,
        "/auth/register",
        json!({ "name": "Ada", "email": email, "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["user"]["email"], email);
}

#[tokio::test]
async fn test_login_roundtrip() {
    let ctx = TestContext::new().await;
    let email = unique_email("login");
    ctx.register("Ada", &email, "password123").await;

    let response = post_json(
        &ctx,
        "/auth/login",
        json!({ "email": email, "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["user"]["email"], email);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let ctx = TestContext::new().await;
    let email = unique_email("enum");
    ctx.register("Ada", &email, "password123").await;

    let wrong_password = post_json(
        &ctx,
        "/auth/login",
        json!({ "email": email, "password": "wrong-password" }),
    )
    .await;
    let unknown_email = post_json(
        &ctx,
        "/auth/login",
        json!({ "email": unique_email("ghost"), "password": "password123" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let body_a: Value = wrong_password.json().await.expect("body");
    let body_b: Value = unknown_email.json().await.expect("body");
    assert_eq!(body_a, body_b, "401 bodies must not leak which case hit");
    assert_eq!(body_a["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let ctx = TestContext::new().await;
    let email = unique_email("me");
    let response = ctx.register("Ada", &email, "password123").await;
    let body: Value = response.json().await.expect("body");
    let token = body["token"].as_str().expect("token");

    let me = ctx
        .client
        .get(ctx.users("/me"))
        .bearer_auth(token)
        .send()
        .await
        .expect("me request failed");
    assert_eq!(me.status(), StatusCode::OK);

    let me_body: Value = me.json().await.expect("body");
    assert_eq!(me_body["user"]["email"], email);
    assert_eq!(me_body["user"]["name"], "Ada");
    assert!(me_body["user"]["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_me_rejects_missing_and_garbage_tokens() {
    let ctx = TestContext::new().await;

    let missing = ctx
        .client
        .get(ctx.users("/me"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = ctx
        .client
        .get(ctx.users("/me"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("request failed");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let body: Value = garbage.json().await.expect("body");
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.users("/health"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["ok"], true);
}
