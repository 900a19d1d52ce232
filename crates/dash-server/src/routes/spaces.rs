// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Space handlers.

use axum::{
	extract::{Path, State},
	Json,
};
use dash_server_api::ErrorResponse;
use dash_server_db::{Space, SpaceUpdate};

use crate::api::AppState;
use crate::auth::RequirePartner;
use crate::error::ServerError;

const SPACE_NOT_FOUND: &str = "Space not found";

#[utoipa::path(
    get,
    path = "/spaces/{space_id}",
    params(
        ("space_id" = String, Path, description = "Space ID")
    ),
    responses(
        (status = 200, description = "Space details", body = Space),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse),
        (status = 404, description = "Space not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "spaces"
)]
/// GET /spaces/{space_id} - Fetch one space.
#[tracing::instrument(skip(state, _partner))]
pub async fn get_space(
	RequirePartner(_partner): RequirePartner,
	State(state): State<AppState>,
	Path(space_id): Path<String>,
) -> Result<Json<Space>, ServerError> {
	let space = state
		.spaces
		.get_space(&space_id)
		.await?
		.ok_or_else(|| ServerError::NotFound(SPACE_NOT_FOUND.to_string()))?;
	Ok(Json(space))
}

#[utoipa::path(
    patch,
    path = "/spaces/{space_id}",
    params(
        ("space_id" = String, Path, description = "Space ID")
    ),
    request_body = SpaceUpdate,
    responses(
        (status = 200, description = "Updated space", body = Space),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse),
        (status = 404, description = "Space not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "spaces"
)]
/// PATCH /spaces/{space_id} - Replace the given top-level fields of a space.
#[tracing::instrument(skip(state, partner, update), fields(uid = %partner.identity.uid))]
pub async fn update_space(
	RequirePartner(partner): RequirePartner,
	State(state): State<AppState>,
	Path(space_id): Path<String>,
	Json(update): Json<SpaceUpdate>,
) -> Result<Json<Space>, ServerError> {
	if update.is_empty() {
		return Err(ServerError::BadRequest("No valid fields to update".to_string()));
	}

	let space = state
		.spaces
		.update_space(&space_id, &update)
		.await?
		.ok_or_else(|| ServerError::NotFound(SPACE_NOT_FOUND.to_string()))?;

	tracing::info!(space_id = %space_id, "space updated");
	Ok(Json(space))
}
