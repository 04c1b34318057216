//! Account storage
//!
//! The account store is an external collaborator reached through the
//! [`AccountStore`] trait. Accounts are keyed by email; uniqueness is
//! enforced by the store itself.

pub mod account;
pub mod memory;

use async_trait::async_trait;
use identity_shared::AccountProfile;
use thiserror::Error;
use uuid::Uuid;

pub use account::PgAccountStore;
pub use memory::InMemoryAccountStore;

/// Account record as persisted
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
    pub language: Option<String>,
}

impl AccountRecord {
    /// Public view of the account, without the password hash
    pub fn into_profile(self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email,
            role: self.role,
            language: self.language,
        }
    }
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
    pub language: Option<String>,
}

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Store operation timed out")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Account store operations
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account; fails with [`StoreError::DuplicateEmail`] if
    /// the email is taken
    async fn insert(&self, account: NewAccount) -> Result<AccountRecord, StoreError>;

    /// Find an account by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError>;

    /// Check the store is reachable
    async fn health_check(&self) -> Result<(), StoreError>;
}
