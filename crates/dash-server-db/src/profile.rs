// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partner profile repository.
//!
//! Profiles are keyed by the identity provider's subject id. Older profiles
//! carry a single `spaceId` instead of the `spaceIds` list; both shapes are
//! normalized on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::document::{Document, DocumentStore, Filter, SortOrder};
use crate::error::DbError;
use crate::types::{NewPartnerProfile, PartnerProfile};

pub const PROFILES_COLLECTION: &str = "partner_profiles";

#[async_trait]
pub trait PartnerProfileStore: Send + Sync {
	async fn get_profile(&self, uid: &str) -> Result<Option<PartnerProfile>, DbError>;
	/// The profile claiming `space_id`, if any.
	async fn find_profile_by_space_id(&self, space_id: &str)
		-> Result<Option<PartnerProfile>, DbError>;
	/// Fails with `DbError::Conflict` if `uid` already has a profile.
	async fn create_profile(
		&self,
		uid: &str,
		profile: &NewPartnerProfile,
	) -> Result<PartnerProfile, DbError>;
}

#[derive(Clone)]
pub struct PartnerProfileRepository {
	store: DocumentStore,
}

impl PartnerProfileRepository {
	pub fn new(store: DocumentStore) -> Self {
		Self { store }
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
	id: String,
	#[serde(default)]
	email: Option<String>,
	#[serde(default, alias = "space_ids")]
	space_ids: Option<Vec<Value>>,
	#[serde(default, alias = "space_id")]
	space_id: Option<Value>,
	#[serde(default)]
	status: Option<String>,
	created_at: Option<DateTime<Utc>>,
	updated_at: Option<DateTime<Utc>>,
}

fn string_ids(values: impl IntoIterator<Item = Value>) -> Vec<String> {
	values
		.into_iter()
		.filter_map(|v| match v {
			Value::String(s) if !s.trim().is_empty() => Some(s),
			_ => None,
		})
		.collect()
}

impl From<StoredProfile> for PartnerProfile {
	fn from(stored: StoredProfile) -> Self {
		let mut space_ids = string_ids(stored.space_ids.unwrap_or_default());
		if space_ids.is_empty() {
			space_ids = match stored.space_id {
				Some(Value::Array(values)) => string_ids(values),
				Some(single) => string_ids([single]),
				None => Vec::new(),
			};
		}

		PartnerProfile {
			id: stored.id,
			email: stored.email.unwrap_or_default(),
			space_ids,
			status: stored.status.unwrap_or_default(),
			created_at: stored.created_at,
			updated_at: stored.updated_at,
		}
	}
}

fn decode_profile(doc: &Document) -> Result<PartnerProfile, DbError> {
	Ok(doc.decode::<StoredProfile>()?.into())
}

#[async_trait]
impl PartnerProfileStore for PartnerProfileRepository {
	#[tracing::instrument(skip(self))]
	async fn get_profile(&self, uid: &str) -> Result<Option<PartnerProfile>, DbError> {
		self
			.store
			.get(PROFILES_COLLECTION, uid)
			.await?
			.as_ref()
			.map(decode_profile)
			.transpose()
	}

	#[tracing::instrument(skip(self))]
	async fn find_profile_by_space_id(
		&self,
		space_id: &str,
	) -> Result<Option<PartnerProfile>, DbError> {
		let current = self
			.store
			.query(
				PROFILES_COLLECTION,
				Some(Filter::array_contains("spaceIds", space_id)),
				SortOrder::OldestFirst,
			)
			.await?;
		if let Some(doc) = current.first() {
			return decode_profile(doc).map(Some);
		}

		let legacy = self
			.store
			.query(
				PROFILES_COLLECTION,
				Some(Filter::eq("spaceId", space_id)),
				SortOrder::OldestFirst,
			)
			.await?;
		legacy.first().map(decode_profile).transpose()
	}

	#[tracing::instrument(skip(self, profile), fields(space_ids = profile.space_ids.len()))]
	async fn create_profile(
		&self,
		uid: &str,
		profile: &NewPartnerProfile,
	) -> Result<PartnerProfile, DbError> {
		let data = json!({
			"email": profile.email,
			"spaceIds": profile.space_ids,
			"status": profile.status,
		});
		let Value::Object(data) = data else {
			return Err(DbError::Internal("profile body is not an object".to_string()));
		};

		let doc = self.store.create(PROFILES_COLLECTION, uid, data).await?;
		tracing::info!(uid, "partner profile created");
		decode_profile(&doc)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	async fn setup() -> (DocumentStore, PartnerProfileRepository) {
		let store = DocumentStore::new(create_test_pool().await);
		(store.clone(), PartnerProfileRepository::new(store))
	}

	fn object(value: Value) -> serde_json::Map<String, Value> {
		match value {
			Value::Object(map) => map,
			_ => panic!("expected object"),
		}
	}

	#[tokio::test]
	async fn test_get_missing_profile() {
		let (_, repo) = setup().await;
		assert!(repo.get_profile("nobody").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_create_and_get_profile() {
		let (_, repo) = setup().await;
		let created = repo
			.create_profile("uid-1", &NewPartnerProfile::active("p@example.com", "space-1"))
			.await
			.unwrap();
		assert_eq!(created.id, "uid-1");
		assert_eq!(created.space_ids, vec!["space-1"]);
		assert!(created.is_active());
		assert!(created.created_at.is_some());

		let fetched = repo.get_profile("uid-1").await.unwrap().unwrap();
		assert_eq!(fetched, created);
	}

	#[tokio::test]
	async fn test_create_profile_twice_conflicts() {
		let (_, repo) = setup().await;
		let profile = NewPartnerProfile::active("p@example.com", "space-1");
		repo.create_profile("uid-1", &profile).await.unwrap();
		let err = repo.create_profile("uid-1", &profile).await.unwrap_err();
		assert!(matches!(err, DbError::Conflict(_)));
	}

	#[tokio::test]
	async fn test_legacy_single_space_id_is_normalized() {
		let (store, repo) = setup().await;
		store
			.set(
				PROFILES_COLLECTION,
				"legacy",
				object(json!({"email": "l@example.com", "spaceId": "old-space", "status": "active"})),
			)
			.await
			.unwrap();

		let profile = repo.get_profile("legacy").await.unwrap().unwrap();
		assert_eq!(profile.space_ids, vec!["old-space"]);
	}

	#[tokio::test]
	async fn test_blank_and_non_string_ids_are_dropped() {
		let (store, repo) = setup().await;
		store
			.set(
				PROFILES_COLLECTION,
				"messy",
				object(json!({"spaceIds": ["A", "", 7, "B"], "status": "pending"})),
			)
			.await
			.unwrap();

		let profile = repo.get_profile("messy").await.unwrap().unwrap();
		assert_eq!(profile.space_ids, vec!["A", "B"]);
		assert!(!profile.is_active());
	}

	#[tokio::test]
	async fn test_profile_without_ids_has_empty_list() {
		let (store, repo) = setup().await;
		store
			.set(PROFILES_COLLECTION, "bare", object(json!({"email": "b@example.com"})))
			.await
			.unwrap();

		let profile = repo.get_profile("bare").await.unwrap().unwrap();
		assert!(profile.space_ids.is_empty());
	}

	#[tokio::test]
	async fn test_find_profile_by_space_id() {
		let (store, repo) = setup().await;
		repo
			.create_profile("uid-1", &NewPartnerProfile::active("a@example.com", "space-a"))
			.await
			.unwrap();
		store
			.set(PROFILES_COLLECTION, "uid-2", object(json!({"spaceId": "space-legacy"})))
			.await
			.unwrap();

		let found = repo.find_profile_by_space_id("space-a").await.unwrap().unwrap();
		assert_eq!(found.id, "uid-1");

		let legacy = repo
			.find_profile_by_space_id("space-legacy")
			.await
			.unwrap()
			.unwrap();
		assert_eq!(legacy.id, "uid-2");

		assert!(repo.find_profile_by_space_id("space-z").await.unwrap().is_none());
	}
}
