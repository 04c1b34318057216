//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys and the store handle are created once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::{JwtService, PasswordService, TokenError};
use crate::config::{AppConfig, ConfigError};
use crate::repositories::AccountStore;
use crate::services::AccountService;
use std::sync::Arc;
use thiserror::Error;

/// Reasons the service refuses to start
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Account store handle
    pub store: Arc<dyn AccountStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Account operations wired to the store, hasher and JWT service
    pub accounts: AccountService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails when the signing secret is missing, the bcrypt cost is outside
    /// bcrypt's range, or the token lifetime is out of bounds. Each is a
    /// fatal configuration error and should abort startup.
    pub fn new(store: Arc<dyn AccountStore>, config: AppConfig) -> Result<Self, StartupError> {
        config.validate()?;
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs)?;
        let accounts = AccountService::new(
            store.clone(),
            PasswordService::new(config.password.bcrypt_cost),
            jwt.clone(),
            config.database.query_timeout(),
        );

        Ok(Self {
            store,
            config: Arc::new(config),
            jwt,
            accounts,
        })
    }

    /// Get a reference to the account store
    #[inline]
    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the account service
    #[inline]
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryAccountStore;

    #[test]
    fn test_state_clone_is_cheap() {
        let state = AppState::new(Arc::new(InMemoryAccountStore::new()), AppConfig::default())
            .unwrap();

        // Clone should be O(1) - just Arc increments
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }

    #[test]
    fn test_jwt_service_is_precomputed() {
        let state = AppState::new(Arc::new(InMemoryAccountStore::new()), AppConfig::default())
            .unwrap();

        let token = state.jwt().issue("a@x.com").unwrap();
        assert_eq!(state.jwt().verify(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn test_missing_secret_fails_startup() {
        let mut config = AppConfig::default();
        config.jwt.secret = String::new();

        let result = AppState::new(Arc::new(InMemoryAccountStore::new()), config);
        assert!(matches!(result, Err(StartupError::Token(TokenError::Signing(_)))));
    }

    #[test]
    fn test_unusable_bcrypt_cost_fails_startup() {
        let mut config = AppConfig::default();
        config.password.bcrypt_cost = 40;

        let result = AppState::new(Arc::new(InMemoryAccountStore::new()), config);
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::BcryptCost(40)))
        ));
    }

    #[test]
    fn test_huge_token_expiry_fails_startup() {
        let mut config = AppConfig::default();
        config.jwt.token_expiry_secs = i64::MAX;

        let result = AppState::new(Arc::new(InMemoryAccountStore::new()), config);
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::TokenExpiry(i64::MAX)))
        ));
    }
}
