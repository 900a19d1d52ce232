// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature taxonomy.
//!
//! `{type}` holds one document per subtype and each subtype keeps its
//! features in the `{type}/{subtype}/features` collection. A feature document
//! carries its labels as flat `en`, `es` and `fr` fields.

use async_trait::async_trait;
use futures::TryStreamExt;

use crate::document::{Document, DocumentStore, SortOrder};
use crate::error::DbError;
use crate::types::{Feature, FeatureTranslations, FeatureType};

pub fn features_collection(feature_type: FeatureType, subtype_id: &str) -> String {
	format!("{}/{subtype_id}/features", feature_type.collection())
}

#[async_trait]
pub trait FeatureStore: Send + Sync {
	/// Every feature of every subtype of `feature_type`.
	async fn list_features(&self, feature_type: FeatureType) -> Result<Vec<Feature>, DbError>;
}

#[derive(Clone)]
pub struct FeatureRepository {
	store: DocumentStore,
}

impl FeatureRepository {
	pub fn new(store: DocumentStore) -> Self {
		Self { store }
	}
}

fn to_feature(doc: Document) -> Feature {
	let label = |lang: &str| doc.get_str(lang).unwrap_or_default().to_string();
	Feature {
		translations: FeatureTranslations {
			en: label("en"),
			es: label("es"),
			fr: label("fr"),
		},
		id: doc.id,
	}
}

#[async_trait]
impl FeatureStore for FeatureRepository {
	#[tracing::instrument(skip(self))]
	async fn list_features(&self, feature_type: FeatureType) -> Result<Vec<Feature>, DbError> {
		let subtypes = self.store.list(feature_type.collection()).await?;

		let mut features = Vec::new();
		for subtype in &subtypes {
			let collection = features_collection(feature_type, &subtype.id);
			let mut batch: Vec<Feature> = self
				.store
				.stream(&collection, None, SortOrder::OldestFirst)
				.map_ok(to_feature)
				.try_collect()
				.await?;
			features.append(&mut batch);
		}

		tracing::debug!(subtypes = subtypes.len(), features = features.len(), "features listed");
		Ok(features)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;
	use serde_json::{json, Map, Value};

	fn object(value: Value) -> Map<String, Value> {
		match value {
			Value::Object(map) => map,
			_ => panic!("expected object"),
		}
	}

	#[tokio::test]
	async fn test_walks_subtypes_and_fills_missing_labels() {
		let store = DocumentStore::new(create_test_pool().await);
		let repo = FeatureRepository::new(store.clone());
		let kind = FeatureType::WorkspaceFeatures;

		store.set("workspace_features", "desks", object(json!({}))).await.unwrap();
		store.set("workspace_features", "rooms", object(json!({}))).await.unwrap();
		store
			.set(
				&features_collection(kind, "desks"),
				"standing",
				object(json!({"en": "Standing desk", "es": "Escritorio de pie", "fr": "Bureau debout"})),
			)
			.await
			.unwrap();
		store
			.set(
				&features_collection(kind, "rooms"),
				"projector",
				object(json!({"en": "Projector"})),
			)
			.await
			.unwrap();
		store
			.set(
				&features_collection(FeatureType::ColivingFeatures, "rooms"),
				"bunk",
				object(json!({"en": "Bunk bed"})),
			)
			.await
			.unwrap();

		let features = repo.list_features(kind).await.unwrap();
		assert_eq!(features.len(), 2);
		assert_eq!(features[0].id, "standing");
		assert_eq!(features[0].translations.fr, "Bureau debout");
		assert_eq!(features[1].id, "projector");
		assert_eq!(features[1].translations.es, "");
	}

	#[tokio::test]
	async fn test_empty_taxonomy() {
		let repo = FeatureRepository::new(DocumentStore::new(create_test_pool().await));
		assert!(repo
			.list_features(FeatureType::ColivingFeatures)
			.await
			.unwrap()
			.is_empty());
	}
}
