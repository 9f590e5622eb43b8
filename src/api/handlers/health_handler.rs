//! Liveness endpoints.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::AppState;
use crate::config::BRAND_NAME;

/// Welcome text
pub async fn root() -> String {
    format!("Welcome to the {} API", BRAND_NAME)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    environment: String,
    services: ServiceHealth,
}

#[derive(Debug, Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    cache: ServiceStatus,
}

#[derive(Debug, Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_degraded(&self) -> bool {
        self.status == "unhealthy"
    }
}

/// Database and cache connectivity. An unconfigured cache reports `disabled`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_result(state.database.ping().await);
    let cache = match state.cache.as_ref() {
        Some(cache) => ServiceStatus::from_result(cache.ping().await),
        None => ServiceStatus {
            status: "disabled",
            error: None,
        },
    };

    let degraded = database.is_degraded() || cache.is_degraded();
    if degraded {
        tracing::warn!(
            database = database.status,
            cache = cache.status,
            "Health check degraded"
        );
    }

    let response = HealthResponse {
        status: if degraded { "degraded" } else { "healthy" },
        timestamp: Utc::now(),
        environment: state.environment.clone(),
        services: ServiceHealth { database, cache },
    };

    let code = if degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (code, Json(response))
}
