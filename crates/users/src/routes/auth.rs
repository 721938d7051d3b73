//! Authentication route handlers.
//!
//! Registration and login return the user together with a freshly minted
//! session token; `/me` resolves a bearer token back to its user.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Value>)> {
    let service = AuthService::new(state.pool(), state.signer());
    let (user, token) = service
        .register(&body.name, &body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": user, "token": token })),
    ))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>> {
    let service = AuthService::new(state.pool(), state.signer());
    let (user, token) = service.login(&body.email, &body.password).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({ "user": user, "token": token })))
}

/// `GET /me`
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<Value>> {
    let service = AuthService::new(state.pool(), state.signer());
    let user = service.current_user(claims.user_id()).await?;

    Ok(Json(json!({ "user": user })))
}
