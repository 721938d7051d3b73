//! Integration test harness for Quills.
//!
//! Spins up the whole system in-process on loopback: the users service
//! backed by an in-memory database, a stub book lookup service, and the
//! gateway fronting both. Each [`TestContext`] is fully isolated, so tests
//! run in parallel without shared state.
//!
//! ```rust,ignore
//! let ctx = TestContext::new().await;
//! let resp = ctx.client.get(ctx.gateway("/health")).send().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod books_stub;

use std::net::SocketAddr;

use axum::Router;
use secrecy::SecretString;
use serde_json::{Value, json};

use quills_gateway::{GatewayConfig, ProxyState};
use quills_users::AppState;

/// Signing secret used by every test service instance.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// A complete running system on ephemeral loopback ports.
pub struct TestContext {
    /// Plain HTTP client for driving the services.
    pub client: reqwest::Client,
    /// Base URL of the users service (direct, no gateway).
    pub users_url: String,
    /// Base URL of the stub books service (direct, no gateway).
    pub books_url: String,
    /// Base URL of the gateway.
    pub gateway_url: String,
}

impl TestContext {
    /// Start all three services and wire the gateway to the other two.
    ///
    /// # Panics
    ///
    /// Panics if any service fails to start; tests cannot proceed without
    /// the full system.
    pub async fn new() -> Self {
        let database_url = SecretString::from("sqlite::memory:");
        let pool = quills_users::db::create_pool(&database_url)
            .await
            .expect("Failed to create database pool");
        quills_users::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users_state = AppState::new(pool, &SecretString::from(TEST_JWT_SECRET));
        let users_addr = spawn(quills_users::app(users_state)).await;
        let books_addr = spawn(books_stub::router()).await;

        let gateway_config = GatewayConfig {
            host: "127.0.0.1".parse().expect("loopback address"),
            port: 0,
            users_service_url: base_url(users_addr).parse().expect("users URL"),
            books_service_url: base_url(books_addr).parse().expect("books URL"),
        };
        let gateway_addr = spawn(quills_gateway::app(ProxyState::new(&gateway_config))).await;

        Self {
            client: reqwest::Client::new(),
            users_url: base_url(users_addr),
            books_url: base_url(books_addr),
            gateway_url: base_url(gateway_addr),
        }
    }

    /// Full URL for a users-service path (bypassing the gateway).
    #[must_use]
    pub fn users(&self, path: &str) -> String {
        format!("{}{path}", self.users_url)
    }

    /// Full URL for a gateway path.
    #[must_use]
    pub fn gateway(&self, path: &str) -> String {
        format!("{}{path}", self.gateway_url)
    }

    /// Register a user directly against the users service.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.users("/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed")
    }

    /// Register a fresh user and return their session token.
    ///
    /// # Panics
    ///
    /// Panics if registration does not succeed.
    pub async fn register_token(&self) -> String {
        let response = self
            .register("Test User", &unique_email("user"), "password123")
            .await;
        assert_eq!(response.status(), 201, "registration should succeed");

        let body: Value = response.json().await.expect("register response body");
        body["token"]
            .as_str()
            .expect("token in register response")
            .to_string()
    }
}

/// A unique email per call, so parallel tests never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4())
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// Bind an ephemeral loopback port and serve the router on it.
async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server error");
    });

    addr
}
