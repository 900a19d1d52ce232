// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP boundary error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dash_server_analytics::MetricsError;
use dash_server_api::ErrorResponse;
use dash_server_auth::AuthError;
use dash_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("{0}")]
	BadRequest(String),

	#[error("{0}")]
	Unauthorized(String),

	#[error("{0}")]
	Forbidden(String),

	#[error("{0}")]
	NotFound(String),

	#[error("{0}")]
	Conflict(String),

	#[error("{0}")]
	Configuration(String),

	#[error("{0}")]
	Internal(String),

	#[error("{0}")]
	ServiceUnavailable(String),
}

impl ServerError {
	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
			ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
			ServerError::NotFound(_) => StatusCode::NOT_FOUND,
			ServerError::Conflict(_) => StatusCode::CONFLICT,
			ServerError::Configuration(_) | ServerError::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
			ServerError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
		}
	}

	fn kind(&self) -> &'static str {
		match self {
			ServerError::BadRequest(_) => "bad_request",
			ServerError::Unauthorized(_) => "unauthorized",
			ServerError::Forbidden(_) => "forbidden",
			ServerError::NotFound(_) => "not_found",
			ServerError::Conflict(_) => "conflict",
			ServerError::Configuration(_) => "configuration_error",
			ServerError::Internal(_) => "internal_error",
			ServerError::ServiceUnavailable(_) => "service_unavailable",
		}
	}
}

impl From<AuthError> for ServerError {
	fn from(e: AuthError) -> Self {
		ServerError::Unauthorized(e.to_string())
	}
}

impl From<DbError> for ServerError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::NotFound(msg) => ServerError::NotFound(msg),
			DbError::Conflict(msg) => ServerError::Conflict(msg),
			other => ServerError::Internal(other.to_string()),
		}
	}
}

impl From<MetricsError> for ServerError {
	fn from(e: MetricsError) -> Self {
		match e {
			MetricsError::InvalidDateRange(_)
			| MetricsError::EmptySpaceIds
			| MetricsError::MissingSpaceIds => ServerError::BadRequest(e.to_string()),
			MetricsError::ProfileNotFound => ServerError::NotFound(e.to_string()),
			MetricsError::NotConfigured => ServerError::Configuration(e.to_string()),
			MetricsError::Store(inner) => {
				ServerError::Internal(format!("Error fetching dashboard metrics: {inner}"))
			}
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(status = status.as_u16(), error = %self, "request failed");
		} else if status == StatusCode::NOT_FOUND {
			tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
		} else {
			tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
		}

		let body = ErrorResponse::new(self.kind(), self.to_string());
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dash_analytics_core::{DateField, DateRangeError};

	#[test]
	fn test_metrics_error_mapping() {
		let cases = [
			(
				MetricsError::InvalidDateRange(DateRangeError::Malformed {
					field: DateField::Start,
				}),
				StatusCode::BAD_REQUEST,
			),
			(MetricsError::EmptySpaceIds, StatusCode::BAD_REQUEST),
			(MetricsError::MissingSpaceIds, StatusCode::BAD_REQUEST),
			(MetricsError::ProfileNotFound, StatusCode::NOT_FOUND),
			(MetricsError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
			(
				MetricsError::Store(DbError::Internal("disk".to_string())),
				StatusCode::INTERNAL_SERVER_ERROR,
			),
		];
		for (err, status) in cases {
			assert_eq!(ServerError::from(err).status(), status);
		}
	}

	#[test]
	fn test_store_failure_detail() {
		let err = ServerError::from(MetricsError::Store(DbError::Internal("disk".to_string())));
		assert_eq!(
			err.to_string(),
			"Error fetching dashboard metrics: Internal: disk"
		);
	}

	#[test]
	fn test_auth_errors_are_unauthorized() {
		let err = ServerError::from(AuthError::MissingHeader);
		assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(err.to_string(), "Authorization header required");
		assert_eq!(
			ServerError::from(AuthError::NotConfigured).status(),
			StatusCode::UNAUTHORIZED
		);
	}

	#[test]
	fn test_db_error_mapping() {
		assert_eq!(
			ServerError::from(DbError::Conflict("dup".to_string())).status(),
			StatusCode::CONFLICT
		);
		assert_eq!(
			ServerError::from(DbError::Internal("x".to_string())).status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}
}
