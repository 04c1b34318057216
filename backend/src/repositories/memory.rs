//! In-memory account store
//!
//! Used by the test suites and for running the service without a database.
//! Behaves like the `accounts` table: ids are assigned on insert and emails
//! are unique and case-sensitive.

use super::{AccountRecord, AccountStore, NewAccount, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete an account, bypassing the service layer
    pub async fn remove(&self, email: &str) -> Option<AccountRecord> {
        self.accounts.write().await.remove(email)
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: NewAccount) -> Result<AccountRecord, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = AccountRecord {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            language: account.language,
        };
        accounts.insert(record.email.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Some("user".to_string()),
            language: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryAccountStore::new();
        let created = store.insert(new_account("a@x.com")).await.unwrap();

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@x.com")).await.unwrap();

        let result = store.insert(new_account("a@x.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@x.com")).await.unwrap();

        assert!(store.find_by_email("A@X.com").await.unwrap().is_none());
        assert!(store.insert(new_account("A@X.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@x.com")).await.unwrap();

        assert!(store.remove("a@x.com").await.is_some());
        assert!(store.is_empty().await);
    }
}
