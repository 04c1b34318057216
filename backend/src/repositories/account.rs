//! PostgreSQL account repository

use super::{AccountRecord, AccountStore, NewAccount, StoreError};
use async_trait::async_trait;
use sqlx::PgPool;

/// Account repository backed by the `accounts` table
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint violation to [`StoreError::DuplicateEmail`]
fn map_insert_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, account: NewAccount) -> Result<AccountRecord, StoreError> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO accounts (email, password_hash, role, language)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, language
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.role)
        .bind(&account.language)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StoreError> {
        let account = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, password_hash, role, language
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::db::health_check(&self.pool).await?;
        Ok(())
    }
}
