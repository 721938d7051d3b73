//! Bearer-token authentication extractor.
//!
//! Provides an extractor for requiring a valid session token in route
//! handlers. Missing, malformed, or expired tokens all reject with 401 so
//! clients treat them uniformly as "session expired".

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::auth::Claims;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.name)
/// }
/// ```
pub struct RequireAuth(pub Claims);

/// Error returned when the bearer token is missing or invalid.
pub enum AuthRejection {
    /// No `Authorization: Bearer <token>` header was present.
    MissingToken,
    /// The token failed verification (bad signature, expired, malformed).
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing token",
            Self::InvalidToken => "Invalid token",
        };
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::MissingToken)?;

        let claims = state
            .signer()
            .verify(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        Ok(Self(claims))
    }
}
