// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
	#[error("Authorization header required")]
	MissingHeader,

	#[error("Invalid token: {0}")]
	InvalidToken(String),

	#[error("Invalid token: signing keys unavailable ({0})")]
	KeyFetch(String),

	#[error("Invalid token: token verification is not configured")]
	NotConfigured,
}

impl AuthError {
	pub fn invalid(reason: impl Into<String>) -> Self {
		AuthError::InvalidToken(reason.into())
	}
}
