// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// Document path, `collection/id`.
	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	/// Filter on a field name that is not a plain identifier.
	#[error("Invalid field name '{0}'")]
	InvalidField(String),

	/// Stored body does not match the model it is read into.
	#[error("Malformed document {path}: {source}")]
	Malformed {
		path: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("Internal: {0}")]
	Internal(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
