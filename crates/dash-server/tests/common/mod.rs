// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures for the router integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header::AUTHORIZATION, Method, Request, StatusCode},
	Router,
};
use dash_analytics_core::{DateRange, EventCount, EventCountSource, SpaceId, TrackedEvent};
use dash_server::{create_router, AppState};
use dash_server_auth::{AuthError, TokenVerifier, VerifiedIdentity};
use dash_server_db::testing::create_test_pool;
use dash_server_db::{
	DbError, DocumentStore, JsonObject, NewPartnerProfile, PartnerProfile, PartnerProfileRepository,
	PartnerProfileStore, Space, SpaceRepository,
};
use dash_server_linkcrypt::LinkCipher;
use serde_json::Value;
use tower::ServiceExt;

/// Accepts `valid:<uid>` and `valid:<uid>:<email>`.
pub struct FakeVerifier;

#[async_trait]
impl TokenVerifier for FakeVerifier {
	async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
		let mut parts = token.splitn(3, ':');
		match (parts.next(), parts.next(), parts.next()) {
			(Some("valid"), Some(uid), email) if !uid.is_empty() => Ok(VerifiedIdentity {
				uid: uid.to_string(),
				email: email.map(str::to_string),
			}),
			_ => Err(AuthError::invalid("signature mismatch")),
		}
	}
}

/// Returns the same count for every query and records what it was asked.
pub struct CountingSource {
	count: u64,
	failing: Option<TrackedEvent>,
	calls: AtomicUsize,
	spaces: Mutex<Vec<String>>,
}

impl CountingSource {
	pub fn new(count: u64) -> Self {
		Self {
			count,
			failing: None,
			calls: AtomicUsize::new(0),
			spaces: Mutex::new(Vec::new()),
		}
	}

	pub fn failing_on(mut self, event: TrackedEvent) -> Self {
		self.failing = Some(event);
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn seen_spaces(&self) -> Vec<String> {
		let mut spaces = self.spaces.lock().unwrap().clone();
		spaces.sort();
		spaces.dedup();
		spaces
	}
}

#[async_trait]
impl EventCountSource for CountingSource {
	async fn query_event_count(
		&self,
		space_id: Option<&SpaceId>,
		event: TrackedEvent,
		_range: &DateRange,
	) -> EventCount {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(space_id) = space_id {
			self.spaces.lock().unwrap().push(space_id.as_str().to_string());
		}
		if self.failing == Some(event) {
			return EventCount::zero_filled("HTTP 500");
		}
		EventCount::Counted(self.count)
	}
}

/// Profile store that counts every read before delegating to SQLite.
pub struct CountingProfiles {
	inner: PartnerProfileRepository,
	lookups: AtomicUsize,
}

impl CountingProfiles {
	pub fn new(store: DocumentStore) -> Self {
		Self {
			inner: PartnerProfileRepository::new(store),
			lookups: AtomicUsize::new(0),
		}
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PartnerProfileStore for CountingProfiles {
	async fn get_profile(&self, uid: &str) -> Result<Option<PartnerProfile>, DbError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		self.inner.get_profile(uid).await
	}

	async fn find_profile_by_space_id(
		&self,
		space_id: &str,
	) -> Result<Option<PartnerProfile>, DbError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		self.inner.find_profile_by_space_id(space_id).await
	}

	async fn create_profile(
		&self,
		uid: &str,
		profile: &NewPartnerProfile,
	) -> Result<PartnerProfile, DbError> {
		self.inner.create_profile(uid, profile).await
	}
}

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	pub store: DocumentStore,
	pub source: Arc<CountingSource>,
	pub profiles: Arc<CountingProfiles>,
	pub cipher: LinkCipher,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_source(Some(CountingSource::new(25))).await
	}

	pub async fn with_source(source: Option<CountingSource>) -> Self {
		let pool = create_test_pool().await;
		let store = DocumentStore::new(pool.clone());
		let configured = source.is_some();
		let source = Arc::new(source.unwrap_or_else(|| CountingSource::new(0)));
		let event_source: Option<Arc<dyn EventCountSource>> = if configured {
			Some(source.clone())
		} else {
			None
		};
		let cipher = LinkCipher::ephemeral();

		let profiles = Arc::new(CountingProfiles::new(store.clone()));

		let state = AppState::with_services(
			pool,
			Arc::new(FakeVerifier),
			profiles.clone(),
			event_source,
			4,
			cipher.clone(),
		);
		Self {
			router: create_router(state.clone()),
			state,
			store,
			source,
			profiles,
			cipher,
		}
	}

	pub async fn put_profile(&self, uid: &str, body: Value) {
		self.store.set("partner_profiles", uid, object(body)).await.unwrap();
	}

	pub async fn put_space(&self, space: Value) -> Space {
		let space: Space = serde_json::from_value(space).unwrap();
		SpaceRepository::new(self.store.clone()).put_space(&space).await.unwrap()
	}

	pub async fn put_document(&self, collection: &str, id: &str, body: Value) {
		self.store.set(collection, id, object(body)).await.unwrap();
	}

	pub async fn send(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<Value>,
	) -> (StatusCode, Value) {
		let mut builder = Request::builder().method(method).uri(uri);
		if let Some(token) = token {
			builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
		}
		let request = match body {
			Some(body) => builder
				.header("content-type", "application/json")
				.body(Body::from(serde_json::to_vec(&body).unwrap()))
				.unwrap(),
			None => builder.body(Body::empty()).unwrap(),
		};

		let response = self.router.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let json = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or(Value::Null)
		};
		(status, json)
	}

	pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
		self.send(Method::GET, uri, token, None).await
	}
}

pub fn object(value: Value) -> JsonObject {
	match value {
		Value::Object(map) => map,
		other => panic!("expected a JSON object, got {other}"),
	}
}
