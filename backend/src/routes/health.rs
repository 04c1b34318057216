//! Health check endpoints
//!
//! - /health - basic health check
//! - /health/ready - readiness probe, pings the account store
//! - /health/live - liveness probe

use crate::repositories::StoreError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn new(status: &'static str, checks: Option<HealthChecks>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

/// Dependency checks reported by the readiness probe
#[derive(Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", None))
}

/// Readiness probe
///
/// Returns 503 when the account store is unreachable or does not answer
/// within the store timeout.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let timeout = state.config().database.query_timeout();
    let result = tokio::time::timeout(timeout, state.store().health_check())
        .await
        .unwrap_or(Err(StoreError::Timeout));

    let store = match result {
        Ok(()) => CheckStatus {
            healthy: true,
            message: None,
        },
        Err(e) => CheckStatus {
            healthy: false,
            message: Some(e.to_string()),
        },
    };

    if store.healthy {
        Ok(Json(HealthResponse::new("ready", Some(HealthChecks { store }))))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("not_ready", Some(HealthChecks { store }))),
        ))
    }
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive", None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repositories::InMemoryAccountStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }

    #[tokio::test]
    async fn test_readiness_with_reachable_store() {
        let state =
            AppState::new(Arc::new(InMemoryAccountStore::new()), AppConfig::default()).unwrap();

        let response = readiness_check(State(state)).await.ok().unwrap();
        assert_eq!(response.status, "ready");
        assert!(response.checks.as_ref().unwrap().store.healthy);
    }
}
