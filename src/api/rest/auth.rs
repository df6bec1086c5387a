use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

/// Read-only POST routes that stay open without a token.
const OPEN_POST_PATHS: &[&str] = &["/pricing/resolve"];

/// Rejects mutating requests that lack the configured admin bearer token.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let method = request.method().clone();
    let read_only = method == Method::GET
        || method == Method::HEAD
        || method == Method::OPTIONS
        || (method == Method::POST && OPEN_POST_PATHS.contains(&request.uri().path()));
    if read_only {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented != Some(expected) {
        tracing::warn!(%method, path = %request.uri().path(), "rejected unauthenticated write");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
