//! Quills API gateway library.
//!
//! Stateless reverse proxy in front of the users and books services.
//! Routes `/api/users/*` and `/api/books/*` by prefix, adds permissive
//! CORS, and reports its own liveness on `/health`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod proxy;

use axum::{
    Json, Router,
    http::{Method, header},
    routing::{any, get},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::GatewayConfig;
pub use proxy::ProxyState;

/// Liveness health check endpoint.
///
/// Reports gateway liveness only; upstream health is not checked.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Build the permissive CORS layer the gateway fronts both services with.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the full gateway application.
#[must_use]
pub fn app(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/users/{*rest}", any(proxy::forward_users))
        .route("/api/books/{*rest}", any(proxy::forward_books))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
