//! Account routes
//!
//! - `POST /accounts` registers an account
//! - `POST /login` exchanges credentials for a bearer token
//! - `GET /accounts` returns the caller's own profile (token required)

use crate::auth::{auth_middleware, AuthenticatedAccount};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::post,
    Json, Router,
};
use identity_shared::{AccountProfile, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};

/// Create account routes
///
/// Only the profile lookup sits behind [`auth_middleware`].
pub fn account_routes(state: AppState) -> Router<AppState> {
    let protected_profile = get_profile.layer(from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/accounts", post(register).get(protected_profile))
        .route("/login", post(login))
}

/// Register a new account
///
/// POST /accounts
///
/// The password hash is redacted from the response.
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let account = state.accounts().register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account registered".to_string(),
            account: account.into_profile(),
        }),
    ))
}

/// Login with email and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.accounts().login(req).await?;
    Ok(Json(token))
}

/// Get the authenticated caller's profile
///
/// GET /accounts
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn get_profile(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<AccountProfile>> {
    let profile = state.accounts().get_profile(&account.email).await?;
    Ok(Json(profile))
}
