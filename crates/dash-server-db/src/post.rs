// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use futures::TryStreamExt;

use crate::document::{DocumentStore, Filter, SortOrder};
use crate::error::DbError;
use crate::types::{to_patch, CommunityPost, PostUpdate};

pub const POSTS_COLLECTION: &str = "posts";

#[async_trait]
pub trait PostStore: Send + Sync {
	/// Store a new post. The id and creation time are assigned here.
	async fn create_post(&self, post: &CommunityPost) -> Result<CommunityPost, DbError>;
	async fn get_post(&self, id: &str) -> Result<Option<CommunityPost>, DbError>;
	/// Returns `None` if the post does not exist.
	async fn update_post(&self, id: &str, update: &PostUpdate)
		-> Result<Option<CommunityPost>, DbError>;
	async fn delete_post(&self, id: &str) -> Result<bool, DbError>;
	/// Posts of a space, newest first.
	async fn list_posts_for_space(&self, space_id: &str) -> Result<Vec<CommunityPost>, DbError>;
}

#[derive(Clone)]
pub struct PostRepository {
	store: DocumentStore,
}

impl PostRepository {
	pub fn new(store: DocumentStore) -> Self {
		Self { store }
	}
}

#[async_trait]
impl PostStore for PostRepository {
	#[tracing::instrument(skip(self, post), fields(space_id = ?post.space_id))]
	async fn create_post(&self, post: &CommunityPost) -> Result<CommunityPost, DbError> {
		let mut body = to_patch(post)?;
		body.remove("id");
		body.remove("createdAt");

		let doc = self.store.add(POSTS_COLLECTION, body).await?;
		tracing::debug!(post_id = %doc.id, "post created");
		doc.decode()
	}

	#[tracing::instrument(skip(self))]
	async fn get_post(&self, id: &str) -> Result<Option<CommunityPost>, DbError> {
		match self.store.get(POSTS_COLLECTION, id).await? {
			Some(doc) => Ok(Some(doc.decode()?)),
			None => Ok(None),
		}
	}

	#[tracing::instrument(skip(self, update))]
	async fn update_post(
		&self,
		id: &str,
		update: &PostUpdate,
	) -> Result<Option<CommunityPost>, DbError> {
		let patch = to_patch(update)?;
		match self.store.update(POSTS_COLLECTION, id, patch).await {
			Ok(doc) => Ok(Some(doc.decode()?)),
			Err(DbError::NotFound(_)) => Ok(None),
			Err(e) => Err(e),
		}
	}

	#[tracing::instrument(skip(self))]
	async fn delete_post(&self, id: &str) -> Result<bool, DbError> {
		self.store.delete(POSTS_COLLECTION, id).await
	}

	#[tracing::instrument(skip(self))]
	async fn list_posts_for_space(&self, space_id: &str) -> Result<Vec<CommunityPost>, DbError> {
		self
			.store
			.stream(
				POSTS_COLLECTION,
				Some(Filter::eq("spaceId", space_id)),
				SortOrder::NewestFirst,
			)
			.and_then(|doc| async move { doc.decode() })
			.try_collect()
			.await
	}
}
