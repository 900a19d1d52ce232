// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::document::DocumentStore;
use crate::error::DbError;
use crate::types::{to_patch, Space, SpaceUpdate};

pub const SPACES_COLLECTION: &str = "spaces";

#[async_trait]
pub trait SpaceStore: Send + Sync {
	async fn get_space(&self, id: &str) -> Result<Option<Space>, DbError>;
	/// Apply the set fields of `update`. Returns `None` if the space does not exist.
	async fn update_space(&self, id: &str, update: &SpaceUpdate) -> Result<Option<Space>, DbError>;
}

#[derive(Clone)]
pub struct SpaceRepository {
	store: DocumentStore,
}

impl SpaceRepository {
	pub fn new(store: DocumentStore) -> Self {
		Self { store }
	}

	/// Write a whole space document. Used for seeding.
	#[tracing::instrument(skip(self, space), fields(space_id = %space.id))]
	pub async fn put_space(&self, space: &Space) -> Result<Space, DbError> {
		let mut body = to_patch(space)?;
		body.remove("id");
		let doc = self.store.set(SPACES_COLLECTION, &space.id, body).await?;
		doc.decode()
	}
}

#[async_trait]
impl SpaceStore for SpaceRepository {
	#[tracing::instrument(skip(self))]
	async fn get_space(&self, id: &str) -> Result<Option<Space>, DbError> {
		match self.store.get(SPACES_COLLECTION, id).await? {
			Some(doc) => Ok(Some(doc.decode()?)),
			None => Ok(None),
		}
	}

	#[tracing::instrument(skip(self, update))]
	async fn update_space(&self, id: &str, update: &SpaceUpdate) -> Result<Option<Space>, DbError> {
		let patch = to_patch(update)?;
		match self.store.update(SPACES_COLLECTION, id, patch).await {
			Ok(doc) => Ok(Some(doc.decode()?)),
			Err(DbError::NotFound(_)) => Ok(None),
			Err(e) => Err(e),
		}
	}
}
