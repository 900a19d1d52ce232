// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dash_analytics_core::DateRangeError;
use dash_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
	#[error(transparent)]
	InvalidDateRange(#[from] DateRangeError),

	#[error("space_ids must contain at least one non-empty value")]
	EmptySpaceIds,

	#[error("User profile not found")]
	ProfileNotFound,

	#[error("Partner space IDs not found in user profile")]
	MissingSpaceIds,

	#[error("Amplitude API credentials not configured")]
	NotConfigured,

	#[error("profile lookup failed: {0}")]
	Store(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
