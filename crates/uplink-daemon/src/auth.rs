//! Bearer token guard for the admin endpoints
//!
//! The inbox is only served to requests carrying `Authorization: Bearer <token>`
//! matching `[admin] token`. With no token configured every request is refused.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::state::AppState;

/// Auth error response
#[derive(Serialize)]
struct AuthError {
    error: String,
    code: &'static str,
}

fn unauthorized(error: &str, code: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthError {
            error: error.to_string(),
            code,
        }),
    )
        .into_response()
}

/// Compare without short-circuiting on the first differing byte
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware admitting only requests with the configured admin token
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state
        .config
        .admin
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
    else {
        warn!(path = %request.uri().path(), "Admin request refused, no token configured");
        return unauthorized("Admin access is disabled", "ADMIN_DISABLED");
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        Some(_) => {
            warn!("Invalid authorization header format");
            return unauthorized(
                "Invalid authorization header format. Expected: Bearer <token>",
                "INVALID_AUTH_FORMAT",
            );
        }
        None => {
            debug!(path = %request.uri().path(), "Missing authorization header");
            return unauthorized("Authorization required", "AUTH_REQUIRED");
        }
    };

    if !tokens_match(token, expected) {
        warn!(path = %request.uri().path(), "Invalid admin token");
        return unauthorized("Invalid token", "INVALID_TOKEN");
    }

    debug!("Admin token accepted");
    next.run(request).await
}
