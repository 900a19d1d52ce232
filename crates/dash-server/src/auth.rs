// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request extractors for authenticated routes.
//!
//! - [`RequireAuth`] - any caller with a valid ID token
//! - [`RequirePartner`] - a valid ID token plus an active partner profile

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dash_server_auth::{extract_bearer_token, VerifiedIdentity};
use dash_server_db::PartnerProfile;

use crate::api::AppState;
use crate::error::ServerError;

/// Verified caller identity.
///
/// ```ignore
/// async fn handler(RequireAuth(identity): RequireAuth) -> impl IntoResponse {
///     identity.uid
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub VerifiedIdentity);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = ServerError;

	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		let token = extract_bearer_token(&parts.headers)?;
		let identity = state.verifier.verify(&token).await?;
		tracing::debug!(uid = %identity.uid, "caller authenticated");
		Ok(RequireAuth(identity))
	}
}

#[derive(Debug, Clone)]
pub struct PartnerContext {
	pub identity: VerifiedIdentity,
	pub profile: PartnerProfile,
}

/// Verified caller with an active partner profile.
#[derive(Debug, Clone)]
pub struct RequirePartner(pub PartnerContext);

impl FromRequestParts<AppState> for RequirePartner {
	type Rejection = ServerError;

	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		let RequireAuth(identity) = RequireAuth::from_request_parts(parts, state).await?;

		let profile = state
			.profiles
			.get_profile(&identity.uid)
			.await?
			.ok_or_else(|| ServerError::Forbidden("User profile not found".to_string()))?;

		if !profile.is_active() {
			tracing::info!(uid = %identity.uid, status = %profile.status, "inactive partner denied");
			return Err(ServerError::Forbidden(
				"Access denied. Partner space required.".to_string(),
			));
		}

		Ok(RequirePartner(PartnerContext { identity, profile }))
	}
}
