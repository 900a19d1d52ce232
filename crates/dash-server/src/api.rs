// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use dash_analytics_core::EventCountSource;
use dash_server_amplitude::{AmplitudeClient, AmplitudeError};
use dash_server_analytics::{DashboardMetricsService, MetricsAggregator};
use dash_server_auth::{FirebaseTokenVerifier, TokenVerifier};
use dash_server_config::{AmplitudeConfig, ServerConfig};
use dash_server_db::{
	DocumentStore, FeatureRepository, FeatureStore, PartnerProfileRepository, PartnerProfileStore,
	PostRepository, PostStore, SpaceRepository, SpaceStore,
};
use dash_server_linkcrypt::LinkCipher;
use sqlx::SqlitePool;

use crate::error::ServerError;
use crate::{api_docs, routes};

/// Shared services, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub verifier: Arc<dyn TokenVerifier>,
	pub profiles: Arc<dyn PartnerProfileStore>,
	pub spaces: Arc<dyn SpaceStore>,
	pub posts: Arc<dyn PostStore>,
	pub features: Arc<dyn FeatureStore>,
	pub metrics: DashboardMetricsService,
	pub link_cipher: Arc<LinkCipher>,
	pub identity_configured: bool,
}

impl AppState {
	/// State over the document store in `pool`. Analytics is optional.
	pub fn with_services(
		pool: SqlitePool,
		verifier: Arc<dyn TokenVerifier>,
		profiles: Arc<dyn PartnerProfileStore>,
		event_source: Option<Arc<dyn EventCountSource>>,
		max_concurrent_queries: usize,
		link_cipher: LinkCipher,
	) -> Self {
		let store = DocumentStore::new(pool.clone());
		let aggregator = event_source.map(|source| {
			Arc::new(MetricsAggregator::new(source).with_max_concurrency(max_concurrent_queries))
		});

		Self {
			pool,
			verifier,
			metrics: DashboardMetricsService::new(profiles.clone(), aggregator),
			profiles,
			spaces: Arc::new(SpaceRepository::new(store.clone())),
			posts: Arc::new(PostRepository::new(store.clone())),
			features: Arc::new(FeatureRepository::new(store)),
			link_cipher: Arc::new(link_cipher),
			identity_configured: true,
		}
	}
}

/// Build the analytics client. Missing credentials leave analytics disabled.
pub fn create_event_source(
	config: &AmplitudeConfig,
) -> Result<Option<Arc<dyn EventCountSource>>, ServerError> {
	let client = match AmplitudeClient::new(config.api_key.as_ref(), config.secret_key.as_ref()) {
		Ok(client) => client,
		Err(AmplitudeError::MissingCredentials) => {
			tracing::warn!("Amplitude credentials not configured; dashboard metrics disabled");
			return Ok(None);
		}
		Err(e) => return Err(ServerError::Configuration(e.to_string())),
	};

	let client = client
		.with_base_url(config.base_url.clone())
		.with_timeout(config.timeout)
		.map_err(|e| ServerError::Configuration(e.to_string()))?;
	Ok(Some(Arc::new(client)))
}

/// Link cipher from the configured key, or an ephemeral one.
pub fn create_link_cipher(config: &ServerConfig) -> Result<LinkCipher, ServerError> {
	match &config.link.key {
		Some(key) => LinkCipher::from_base64_key(key.expose())
			.map_err(|e| ServerError::Configuration(e.to_string())),
		None => {
			tracing::warn!(
				"DASH_SERVER_LINK_KEY not set; using an ephemeral key, registration links will not survive a restart"
			);
			Ok(LinkCipher::ephemeral())
		}
	}
}

pub async fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let verifier = FirebaseTokenVerifier::new(config.firebase.project_id.clone())
		.map_err(|e| ServerError::Configuration(e.to_string()))?
		.with_jwks_url(config.firebase.jwks_url.clone());
	let identity_configured = verifier.is_configured();

	let event_source = create_event_source(&config.amplitude)?;
	let link_cipher = create_link_cipher(config)?;

	let profiles = Arc::new(PartnerProfileRepository::new(DocumentStore::new(pool.clone())));
	let mut state = AppState::with_services(
		pool,
		Arc::new(verifier),
		profiles,
		event_source,
		config.amplitude.max_concurrent_queries,
		link_cipher,
	);
	state.identity_configured = identity_configured;

	tracing::info!(
		identity = identity_configured,
		analytics = state.metrics.is_configured(),
		"application state ready"
	);
	Ok(state)
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api-docs/openapi.json", get(api_docs::openapi_json))
		.route(
			"/dashboard-metrics/",
			get(routes::dashboard_metrics::get_dashboard_metrics),
		)
		.route(
			"/dashboard-metrics",
			get(routes::dashboard_metrics::get_dashboard_metrics),
		)
		.route(
			"/spaces/{space_id}",
			get(routes::spaces::get_space).patch(routes::spaces::update_space),
		)
		.route("/posts/", post(routes::posts::create_post))
		.route("/posts", post(routes::posts::create_post))
		.route(
			"/posts/{post_id}",
			get(routes::posts::get_post)
				.patch(routes::posts::update_post)
				.delete(routes::posts::delete_post),
		)
		.route(
			"/posts/space/{space_id}",
			get(routes::posts::list_posts_for_space),
		)
		.route("/features/", get(routes::features::list_features))
		.route("/features", get(routes::features::list_features))
		.route(
			"/partner-profiles/",
			post(routes::partner_profiles::create_partner_profile),
		)
		.route(
			"/partner-profiles",
			post(routes::partner_profiles::create_partner_profile),
		)
		.with_state(state)
}
