//! Stub book lookup service.
//!
//! Stands in for the external search backend during tests: a fixed
//! catalog, summary records with deliberately ragged field completeness,
//! and detail records that disagree with summaries on author (the client
//! merge rules are what's under test, not this service).

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

/// Id of the well-populated catalog entry.
pub const DUNE_ID: &str = "/works/OL1W";

/// Id of the entry whose summary has almost every field missing.
pub const SPARSE_ID: &str = "/works/OL2W";

/// Build the stub service router.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/detail", get(detail))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();

    if query.eq_ignore_ascii_case("nothing") {
        return Json(json!({ "results": [] }));
    }

    Json(json!({
        "results": [
            {
                "id": DUNE_ID,
                "title": "  Dune ",
                "author": "Frank Herbert",
                "year": "1965",
                "cover": null,
                "tags": ["fiction", " classics "]
            },
            {
                "id": SPARSE_ID,
                "title": null,
                "author": ""
            }
        ]
    }))
}

async fn detail(Query(params): Query<HashMap<String, String>>) -> Response {
    let id = params.get("id").map(String::as_str).unwrap_or_default();

    match id {
        DUNE_ID => Json(json!({
            "title": "Dune",
            "author": "Herbert, Frank",
            "year": "1965-08",
            "cover": "https://covers.example.com/dune.jpg",
            "desc": "Spice, sand, and a very large worm.",
            "tags": ["fiction", "classics", "space opera"]
        }))
        .into_response(),
        SPARSE_ID => Json(json!({
            "title": "Found Title",
            "desc": "A description only detail knows."
        }))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
    }
}
