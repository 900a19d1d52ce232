// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmplitudeError {
	/// API key or secret key unset. Raised at construction, never per request.
	#[error("Amplitude API credentials not configured")]
	MissingCredentials,

	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("Request timed out")]
	Timeout,

	#[error("Amplitude rejected the credentials")]
	Unauthorized,

	#[error("Invalid response from Amplitude: {0}")]
	InvalidResponse(String),

	#[error("Amplitude API error: {status} - {message}")]
	ApiError { status: u16, message: String },
}
