// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard metrics handler.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use dash_server_api::{DashboardMetrics, DashboardMetricsQuery, ErrorResponse};

use crate::api::AppState;
use crate::auth::RequireAuth;
use crate::error::ServerError;

#[utoipa::path(
    get,
    path = "/dashboard-metrics/",
    params(DashboardMetricsQuery),
    responses(
        (status = 200, description = "Event counts for the requested window", body = DashboardMetrics),
        (status = 400, description = "Invalid dates or space ids", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Caller has no partner profile", body = ErrorResponse),
        (status = 500, description = "Analytics not configured or store failure", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "metrics"
)]
/// GET /dashboard-metrics/ - Eight event counts for the caller's spaces.
///
/// # Query Parameters
/// - `start_date`, `end_date`: `YYYY-MM-DD`, default to the last 30 days
/// - `space_ids`: repeatable, overrides the spaces of the caller's profile
#[tracing::instrument(skip(state, identity, query), fields(uid = %identity.uid))]
pub async fn get_dashboard_metrics(
	RequireAuth(identity): RequireAuth,
	State(state): State<AppState>,
	Query(query): Query<DashboardMetricsQuery>,
) -> Result<Json<DashboardMetrics>, ServerError> {
	let metrics = state
		.metrics
		.dashboard_metrics(
			&identity.uid,
			query.start_date.as_deref(),
			query.end_date.as_deref(),
			query.explicit_space_ids(),
		)
		.await?;

	Ok(Json(metrics))
}
