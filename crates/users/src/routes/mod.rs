//! HTTP route handlers for the users service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Auth
//! POST   /auth/register          - Create an account, returns token + user
//! POST   /auth/login             - Exchange credentials for token + user
//! GET    /me                     - Current user for a bearer token
//!
//! # Favorites (require auth)
//! GET    /favorites              - List favorites, newest first
//! POST   /favorites              - Add or refresh a favorite snapshot
//! DELETE /favorites/{book_id}    - Remove a favorite (idempotent)
//! ```

pub mod auth;
pub mod favorites;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::json;

use crate::state::AppState;

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list).post(favorites::add))
        .route("/{book_id}", delete(favorites::remove))
}

/// Create all routes for the users service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .route("/me", get(auth::me))
        .nest("/favorites", favorites_routes())
}
