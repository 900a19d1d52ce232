// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::error::AuthError;

/// Extract the token from the Authorization header.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
	let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
	let raw = value
		.to_str()
		.map_err(|_| AuthError::invalid("authorization header is not valid ASCII"))?;

	let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
	if token.is_empty() {
		return Err(AuthError::invalid("empty bearer token"));
	}
	Ok(token.to_string())
}
