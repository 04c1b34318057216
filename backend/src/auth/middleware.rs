//! Authentication middleware
//!
//! Gates protected routes on a valid bearer token. On success the verified
//! email is stored in the request extensions as [`AuthenticatedAccount`];
//! handlers read it from there and never look at the header themselves.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Identity attached to a request by [`auth_middleware`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub email: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when auth_middleware admitted the request
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or(ApiError::MissingToken)
    }
}

/// Extract the bearer token from the `Authorization` header
///
/// The scheme must be `Bearer` (any case) followed by a non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(AUTHORIZATION).ok_or(ApiError::MissingToken)?;
    let value = value.to_str().map_err(|_| ApiError::InvalidToken)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(ApiError::InvalidToken)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::InvalidToken);
    }

    Ok(token)
}

/// Middleware that admits requests carrying a valid token
///
/// Apply with `axum::middleware::from_fn_with_state`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let email = state.jwt().verify(token).map_err(|_| ApiError::InvalidToken)?;
    debug!(email = %email, "Request authenticated");

    request.extensions_mut().insert(AuthenticatedAccount { email });

    Ok(next.run(request).await)
}
