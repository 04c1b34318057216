//! Account database pool and migrations
//!
//! Every pool limit comes from [`DatabaseConfig`], so `IDENTITY__DATABASE__*`
//! variables and the TOML files tune the pool without code changes.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use tracing::{info, warn};

/// Name reported to Postgres in `pg_stat_activity`
const APPLICATION_NAME: &str = "identity-service";

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .test_before_acquire(true)
}

/// Open the account store pool described by `config`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(&config.url)?.application_name(APPLICATION_NAME);

    let pool = pool_options(config).connect_with(connect_options).await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Account store pool ready"
    );

    Ok(pool)
}

/// Apply the `accounts` schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running account store migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Account store migrations applied");
    Ok(())
}

/// `SELECT 1` round trip used by the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Account store health check failed: {}", e);
            e
        })
}
