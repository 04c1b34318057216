//! Account service for registration, login and profile lookup
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service holds pre-computed keys
//! - Every store call is bounded by a timeout; failures are not retried

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{AccountRecord, AccountStore, NewAccount, StoreError};
use identity_shared::validation::require_credentials;
use identity_shared::{AccountProfile, LoginRequest, RegisterRequest, TokenResponse};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Account service
///
/// All collaborators are injected at construction; cloning is cheap.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    passwords: PasswordService,
    jwt: JwtService,
    store_timeout: Duration,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        passwords: PasswordService,
        jwt: JwtService,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            passwords,
            jwt,
            store_timeout,
        }
    }

    /// Run a store operation under the configured timeout
    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    /// Register a new account
    ///
    /// Returns the stored record, password hash included. Callers exposing
    /// it outside the process should use [`AccountRecord::into_profile`].
    pub async fn register(&self, req: RegisterRequest) -> Result<AccountRecord, ApiError> {
        let (email, password) =
            require_credentials(req.email.as_deref(), req.password.as_deref())?;

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = self
            .passwords
            .hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let account = NewAccount {
            email: email.to_string(),
            password_hash,
            role: req.role,
            language: req.language,
        };

        let record = self.bounded(self.store.insert(account)).await.map_err(|e| {
            if matches!(e, StoreError::DuplicateEmail) {
                warn!(email = %email, "Registration rejected: email already registered");
            }
            ApiError::from(e)
        })?;

        info!(account_id = %record.id, "Account registered");
        Ok(record)
    }

    /// Login with email and password
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, ApiError> {
        let (email, password) =
            require_credentials(req.email.as_deref(), req.password.as_deref())?;

        let account = self
            .bounded(self.store.find_by_email(email))
            .await?
            .ok_or(ApiError::AccountNotFound)?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password.to_string(), account.password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            info!(account_id = %account.id, "Login rejected: incorrect password");
            return Err(ApiError::InvalidCredential);
        }

        let token = self.jwt.issue(&account.email)?;

        Ok(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiry_secs(),
        })
    }

    /// Profile of the account a verified token was issued to
    pub async fn get_profile(&self, email: &str) -> Result<AccountProfile, ApiError> {
        let account = self
            .bounded(self.store.find_by_email(email))
            .await?
            .ok_or(ApiError::AccountNotFound)?;

        Ok(account.into_profile())
    }
}
