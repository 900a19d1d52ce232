// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the health and documentation routes.

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_health_reports_components() {
	let app = TestApp::new().await;

	let (status, body) = app.get("/health", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["components"]["database"]["status"], "healthy");
	assert_eq!(body["components"]["analytics"], "configured");
	assert_eq!(body["components"]["identity"], "configured");
	assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_without_analytics() {
	let app = TestApp::with_source(None).await;

	let (status, body) = app.get("/health", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["components"]["analytics"], "not_configured");
}

#[tokio::test]
async fn test_health_with_closed_pool_is_503() {
	let app = TestApp::new().await;
	app.state.pool.close().await;

	let (status, body) = app.get("/health", None).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["status"], "unhealthy");
	assert_eq!(body["components"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
	let app = TestApp::new().await;

	let (status, body) = app.get("/api-docs/openapi.json", None).await;

	assert_eq!(status, StatusCode::OK);
	assert!(body["paths"]["/dashboard-metrics/"].is_object());
	assert!(body["paths"]["/partner-profiles/"].is_object());
}

#[tokio::test]
async fn test_default_config_starts_with_services_disabled() {
	let pool = dash_server_db::testing::create_test_pool().await;
	let config = dash_server::ServerConfig::default();

	let state = dash_server::create_app_state(pool, &config).await.unwrap();
	assert!(!state.metrics.is_configured());
	assert!(!state.identity_configured);

	let app = dash_server::create_router(state);
	let response = tower::ServiceExt::oneshot(
		app,
		axum::http::Request::builder()
			.uri("/health")
			.body(axum::body::Body::empty())
			.unwrap(),
	)
	.await
	.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
	assert_eq!(body["components"]["identity"], "not_configured");
	assert_eq!(body["components"]["analytics"], "not_configured");
}
