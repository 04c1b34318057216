//! Error types for the identity service

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error codes carried in API error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingCredentials,
    InvalidBody,
    AccountNotFound,
    InvalidCredential,
    MissingToken,
    InvalidToken,
    DuplicateEmail,
    InternalError,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingCredentials => "MISSING_CREDENTIALS",
            ErrorCode::InvalidBody => "INVALID_BODY",
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorCode::InvalidCredential => "INVALID_CREDENTIAL",
            ErrorCode::MissingToken => "MISSING_TOKEN",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client input errors detected before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing credentials")]
    MissingCredentials,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::MissingCredentials => ErrorCode::MissingCredentials,
        }
    }
}
