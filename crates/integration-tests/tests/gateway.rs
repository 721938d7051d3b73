//! Integration tests for gateway pass-through behavior.

use reqwest::StatusCode;
use serde_json::{Value, json};

use quills_gateway::{GatewayConfig, ProxyState};
use quills_integration_tests::{TestContext, books_stub, unique_email};

#[tokio::test]
async fn test_gateway_health_is_local() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.gateway("/health"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_users_route_forwards_with_prefix_stripped() {
    let ctx = TestContext::new().await;
    let email = unique_email("via-gateway");

    let response = ctx
        .client
        .post(ctx.gateway("/api/users/auth/register"))
        .json(&json!({ "name": "Ada", "email": email, "password": "password123" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["user"]["email"], email);
}

#[tokio::test]
async fn test_books_route_forwards_query_string() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.gateway("/api/books/search?q=dune"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("body");
    let results = body["results"].as_array().expect("results");
    assert_eq!(results[0]["id"], books_stub::DUNE_ID);
}

#[tokio::test]
async fn test_upstream_error_status_passes_through() {
    let ctx = TestContext::new().await;

    // Unknown detail id: the stub's 404 and body must come back unchanged
    let response = ctx
        .client
        .get(ctx.gateway("/api/books/detail?id=missing"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn test_authorization_header_is_forwarded() {
    let ctx = TestContext::new().await;
    let token = ctx.register_token().await;

    let response = ctx
        .client
        .get(ctx.gateway("/api/users/me"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["user"]["name"], "Test User");
}

#[tokio::test]
async fn test_unreachable_upstream_yields_bad_gateway() {
    // A gateway pointed at ports nothing listens on
    let config = GatewayConfig {
        host: "127.0.0.1".parse().expect("loopback"),
        port: 0,
        users_service_url: "http://127.0.0.1:9".parse().expect("url"),
        books_service_url: "http://127.0.0.1:9".parse().expect("url"),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, quills_gateway::app(ProxyState::new(&config)))
            .await
            .expect("server error");
    });

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/api/books/search?q=dune"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "upstream unreachable");
}

#[tokio::test]
async fn test_cors_preflight_is_permissive() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .request(reqwest::Method::OPTIONS, ctx.gateway("/api/users/auth/login"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type, authorization")
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
