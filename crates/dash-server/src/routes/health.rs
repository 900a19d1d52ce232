// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use dash_server_api::{
	ComponentStatus, DatabaseHealth, HealthComponents, HealthResponse, HealthStatus,
};
use sqlx::SqlitePool;
use tokio::time::Instant;

use crate::api::AppState;

async fn check_database(pool: &SqlitePool) -> DatabaseHealth {
	let start = Instant::now();
	let result = dash_server_db::ping(pool).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(()) => DatabaseHealth {
			status: ComponentStatus::Healthy,
			latency_ms,
			error: None,
		},
		Err(e) => {
			tracing::error!(error = %e, "database health check failed");
			DatabaseHealth {
				status: ComponentStatus::Unhealthy,
				latency_ms,
				error: Some(e.to_string()),
			}
		}
	}
}

fn configured(flag: bool) -> ComponentStatus {
	if flag {
		ComponentStatus::Configured
	} else {
		ComponentStatus::NotConfigured
	}
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Database ping plus configuration status of external services.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = check_database(&state.pool).await;

	let status = if database.status == ComponentStatus::Healthy {
		HealthStatus::Healthy
	} else {
		HealthStatus::Unhealthy
	};

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now(),
		components: HealthComponents {
			database,
			analytics: configured(state.metrics.is_configured()),
			identity: configured(state.identity_configured),
		},
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
