// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partner registration handler.

use axum::{extract::State, http::StatusCode, Json};
use dash_server_api::{ErrorResponse, PartnerProfileCreate};
use dash_server_db::{DbError, NewPartnerProfile, PartnerProfile};

use crate::api::AppState;
use crate::auth::RequireAuth;
use crate::error::ServerError;

const EMAIL_MISMATCH: &str = "User email does not match the space's contact email";
const ALREADY_REGISTERED: &str = "Partner profile already exists for this user";

#[utoipa::path(
    post,
    path = "/partner-profiles/",
    request_body = PartnerProfileCreate,
    responses(
        (status = 201, description = "Profile created", body = PartnerProfile),
        (status = 400, description = "Undecryptable space id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller email does not match the space contact", body = ErrorResponse),
        (status = 404, description = "Space not found", body = ErrorResponse),
        (status = 409, description = "Space already claimed or caller already registered", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "partner-profiles"
)]
/// POST /partner-profiles/ - Claim a space from a registration link.
///
/// The caller proves ownership by signing in with the contact email of the
/// space. Only the token is required since the caller has no profile yet.
#[tracing::instrument(skip(state, identity, body), fields(uid = %identity.uid))]
pub async fn create_partner_profile(
	RequireAuth(identity): RequireAuth,
	State(state): State<AppState>,
	Json(body): Json<PartnerProfileCreate>,
) -> Result<(StatusCode, Json<PartnerProfile>), ServerError> {
	let space_id = state
		.link_cipher
		.decrypt_space_id(&body.hashed_space_id)
		.ok_or_else(|| ServerError::BadRequest("Invalid encrypted space ID format".to_string()))?;

	if state.profiles.find_profile_by_space_id(&space_id).await?.is_some() {
		return Err(ServerError::Conflict(
			"Partner profile already exists with this space ID".to_string(),
		));
	}

	let space = state.spaces.get_space(&space_id).await?.ok_or_else(|| {
		ServerError::NotFound("Space not found with the provided space ID".to_string())
	})?;

	let email = identity
		.email
		.as_deref()
		.map(str::trim)
		.filter(|email| !email.is_empty() && email.eq_ignore_ascii_case(space.contact_email().trim()))
		.ok_or_else(|| ServerError::Forbidden(EMAIL_MISMATCH.to_string()))?;

	let profile = state
		.profiles
		.create_profile(&identity.uid, &NewPartnerProfile::active(email, space_id.as_str()))
		.await
		.map_err(|err| match err {
			DbError::Conflict(_) => ServerError::Conflict(ALREADY_REGISTERED.to_string()),
			other => other.into(),
		})?;

	tracing::info!(space_id = %space_id, "partner profile created");
	Ok((StatusCode::CREATED, Json(profile)))
}
