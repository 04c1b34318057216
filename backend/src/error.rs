//! Application error handling
//!
//! Every per-request failure is one variant of [`ApiError`], mapped to an
//! HTTP status and a JSON body in `IntoResponse`. Infrastructure failures
//! are logged here and reported to the client as a generic 500.

use crate::auth::TokenError;
use crate::repositories::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use identity_shared::{ErrorCode, ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::{debug, error};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing credentials")]
    MissingCredentials,

    /// Body absent, not JSON, or fields of the wrong type
    #[error("Request body must be a JSON object with string fields")]
    InvalidBody,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Incorrect password")]
    InvalidCredential,

    #[error("Token not provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::AccountNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCredential | ApiError::MissingToken | ApiError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Signing(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::MissingCredentials => ErrorCode::MissingCredentials,
            ApiError::InvalidBody => ErrorCode::InvalidBody,
            ApiError::AccountNotFound => ErrorCode::AccountNotFound,
            ApiError::InvalidCredential => ErrorCode::InvalidCredential,
            ApiError::MissingToken => ErrorCode::MissingToken,
            ApiError::InvalidToken => ErrorCode::InvalidToken,
            ApiError::DuplicateEmail => ErrorCode::DuplicateEmail,
            ApiError::Store(_) | ApiError::Signing(_) | ApiError::Internal(_) => {
                ErrorCode::InternalError
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail,
            other => ApiError::Store(other),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => ApiError::Signing(msg),
            TokenError::Invalid => ApiError::InvalidToken,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingCredentials => ApiError::MissingCredentials,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // The rejection text names serde internals; keep it in the logs only
        debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
        ApiError::InvalidBody
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(err) => {
                error!("Store error: {:?}", err);
                "A storage error occurred".to_string()
            }
            ApiError::Signing(msg) => {
                error!("Token signing error: {}", msg);
                "An internal error occurred".to_string()
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(self.code(), message))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
