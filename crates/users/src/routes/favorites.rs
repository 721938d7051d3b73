//! Favorites route handlers.
//!
//! All handlers require a bearer token. Adding a favorite upserts the
//! snapshot so re-adding a book refreshes the stored copy, and removal is
//! idempotent.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use quills_core::{Book, RawBook};

use crate::db::favorites::FavoriteRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Minimum book id length after trimming.
const MIN_BOOK_ID_LENGTH: usize = 2;

/// `GET /favorites`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<Value>> {
    let repo = FavoriteRepository::new(state.pool());
    let favorites = repo.list(claims.user_id()).await?;

    Ok(Json(json!({ "favorites": favorites })))
}

/// `POST /favorites`
///
/// The body is read untyped: clients may submit any JSON object as the
/// snapshot, and a non-string `bookId` gets the same 400 as a short one.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let book_id = body
        .get("bookId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    if book_id.chars().count() < MIN_BOOK_ID_LENGTH {
        return Err(AppError::BadRequest("Invalid bookId".into()));
    }

    let raw = match body.get("book") {
        Some(Value::Object(map)) => RawBook::from_object(map),
        _ => return Err(AppError::BadRequest("Invalid book".into())),
    };
    let mut book = Book::from_summary(raw);
    if book.id.is_empty() {
        book.id = book_id.to_string();
    }

    let repo = FavoriteRepository::new(state.pool());
    repo.upsert(claims.user_id(), book_id, &book).await?;

    tracing::debug!(user_id = %claims.user_id(), book_id, "favorite upserted");

    Ok((StatusCode::CREATED, Json(json!({ "ok": true }))))
}

/// `DELETE /favorites/{book_id}`
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(book_id): Path<String>,
) -> Result<Json<Value>> {
    let book_id = book_id.trim();
    if book_id.is_empty() {
        return Err(AppError::BadRequest("Invalid bookId".into()));
    }

    let repo = FavoriteRepository::new(state.pool());
    repo.delete(claims.user_id(), book_id).await?;

    Ok(Json(json!({ "ok": true })))
}
