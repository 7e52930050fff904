//! Authentication and identity for the REST API
//!
//! Two concerns live here:
//! - Optional API key authentication via the `X-Api-Key` header. When
//!   `ApiConfig::api_key` is set, all requests must carry a matching header
//!   or receive 401 Unauthorized.
//! - Caller identity resolution via the trusted `X-User-Id` header. Identity
//!   is resolved once at the boundary and passed down explicitly; nothing
//!   below the API reads ambient request state.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use crate::error::ApiError;
use crate::types::UserId;

/// Caller identity extracted from the `X-User-Id` header
///
/// `None` means an anonymous caller; handlers decide what that implies
/// (empty history, default settings, rejected settings writes).
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<UserId>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(|s| UserId(s.to_string()));

        Ok(CallerIdentity(user))
    }
}

/// Authentication middleware that checks for a valid API key in the
/// X-Api-Key header
///
/// Returns 401 Unauthorized if the API key is missing or invalid, otherwise
/// passes the request to the next handler.
pub async fn require_api_key(
    State(expected_api_key): State<Option<String>>,
    request: Request,
    next: Next,
) -> Response {
    // If no API key is configured, allow all requests through
    let Some(expected_key) = expected_api_key else {
        return next.run(request).await;
    };

    let api_key_header = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    // Uses constant-time comparison to prevent timing side-channel attacks
    match api_key_header {
        Some(provided_key)
            if constant_time_eq(provided_key.as_bytes(), expected_key.as_bytes()) =>
        {
            next.run(request).await
        }
        Some(_) => unauthorized_response("Invalid API key"),
        None => unauthorized_response("Missing X-Api-Key header"),
    }
}

/// Constant-time byte comparison to prevent timing side-channel attacks.
/// Always compares all bytes regardless of where the first mismatch occurs.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError::new("unauthorized", message)),
    )
        .into_response()
}
