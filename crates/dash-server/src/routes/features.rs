// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature taxonomy handler.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use dash_server_api::{ErrorResponse, FeaturesQuery};
use dash_server_db::{Feature, FeatureType};

use crate::api::AppState;
use crate::auth::RequirePartner;
use crate::error::ServerError;

#[utoipa::path(
    get,
    path = "/features/",
    params(FeaturesQuery),
    responses(
        (status = 200, description = "Every feature of the requested taxonomy", body = [Feature]),
        (status = 400, description = "Missing or unknown feature_type", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "features"
)]
/// GET /features/ - Flat list of features across all subtypes of a taxonomy.
#[tracing::instrument(skip(state, _partner, query))]
pub async fn list_features(
	RequirePartner(_partner): RequirePartner,
	State(state): State<AppState>,
	Query(query): Query<FeaturesQuery>,
) -> Result<Json<Vec<Feature>>, ServerError> {
	let feature_type: FeatureType = query
		.feature_type
		.as_deref()
		.ok_or_else(|| ServerError::BadRequest("feature_type is required".to_string()))?
		.parse()
		.map_err(ServerError::BadRequest)?;

	let features = state.features.list_features(feature_type).await?;
	tracing::debug!(count = features.len(), feature_type = feature_type.collection(), "features listed");
	Ok(Json(features))
}
