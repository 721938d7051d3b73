//! Reverse-proxy forwarding.
//!
//! Strips a fixed path prefix and forwards the remaining path, query,
//! headers, and body to the upstream service, then relays the upstream
//! response byte-for-byte with its status code preserved. No retries and
//! no payload transformation happen here.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::config::GatewayConfig;

/// Path prefix routed to the users service.
pub const USERS_PREFIX: &str = "/api/users";

/// Path prefix routed to the books service.
pub const BOOKS_PREFIX: &str = "/api/books";

/// Maximum request body size accepted for forwarding (10 MiB).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that are connection-scoped and must not be forwarded.
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// Shared proxy state: one upstream client plus the target base URLs.
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    users_base: Url,
    books_base: Url,
}

impl ProxyState {
    /// Create proxy state from gateway configuration.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            users_base: config.users_service_url.clone(),
            books_base: config.books_service_url.clone(),
        }
    }
}

/// `ANY /api/users/{*rest}`
pub async fn forward_users(State(state): State<ProxyState>, req: Request) -> Response {
    let base = state.users_base.clone();
    forward(&state, &base, USERS_PREFIX, req).await
}

/// `ANY /api/books/{*rest}`
pub async fn forward_books(State(state): State<ProxyState>, req: Request) -> Response {
    let base = state.books_base.clone();
    forward(&state, &base, BOOKS_PREFIX, req).await
}

/// Forward one request to an upstream and relay its response.
async fn forward(state: &ProxyState, base: &Url, prefix: &str, req: Request) -> Response {
    let (parts, body) = req.into_parts();

    let Ok(target) = build_target(base, prefix, parts.uri.path(), parts.uri.query()) else {
        tracing::error!(path = parts.uri.path(), "failed to build upstream URL");
        return bad_gateway();
    };

    let Ok(body_bytes) = axum::body::to_bytes(body, MAX_BODY_BYTES).await else {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            axum::Json(json!({ "error": "Request body too large" })),
        )
            .into_response();
    };

    let mut builder = state.client.request(parts.method.clone(), target.clone());
    for (name, value) in &parts.headers {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        builder = builder.header(name, value);
    }

    let upstream_response = match builder.body(body_bytes).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(upstream = %target, error = %err, "upstream unreachable");
            return bad_gateway();
        }
    };

    relay(upstream_response).await
}

/// Convert an upstream response into a client-facing one.
async fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read upstream body");
            return bad_gateway();
        }
    };

    let mut builder = Response::builder().status(status);
    for (name, value) in &headers {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        builder = builder.header(name, value);
    }

    match builder.body(Body::from(bytes)) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "failed to assemble relayed response");
            bad_gateway()
        }
    }
}

/// Build the upstream URL for a request path and query.
fn build_target(
    base: &Url,
    prefix: &str,
    path: &str,
    query: Option<&str>,
) -> Result<Url, url::ParseError> {
    let stripped = path.strip_prefix(prefix).unwrap_or(path);
    let mut target = base.join(stripped)?;
    target.set_query(query);
    Ok(target)
}

/// Whether a header is connection-scoped.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| name.as_str().eq_ignore_ascii_case(hop))
}

fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        axum::Json(json!({ "error": "upstream unreachable" })),
    )
        .into_response()
}
