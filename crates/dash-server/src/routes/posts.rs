// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Community post handlers.

use axum::{
	extract::{Path, State},
	Json,
};
use dash_server_api::{ErrorResponse, MessageResponse};
use dash_server_db::{CommunityPost, PostUpdate};

use crate::api::AppState;
use crate::auth::RequirePartner;
use crate::error::ServerError;

const POST_NOT_FOUND: &str = "Post not found";

fn post_not_found() -> ServerError {
	ServerError::NotFound(POST_NOT_FOUND.to_string())
}

#[utoipa::path(
    post,
    path = "/posts/",
    request_body = CommunityPost,
    responses(
        (status = 200, description = "Post created", body = CommunityPost),
        (status = 400, description = "Invalid post", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "posts"
)]
/// POST /posts/ - Create a post. The id and creation time are assigned by the server.
#[tracing::instrument(skip(state, partner, post), fields(uid = %partner.identity.uid))]
pub async fn create_post(
	RequirePartner(partner): RequirePartner,
	State(state): State<AppState>,
	Json(post): Json<CommunityPost>,
) -> Result<Json<CommunityPost>, ServerError> {
	if let Some(reason) = post.validation_error() {
		return Err(ServerError::BadRequest(reason.to_string()));
	}

	let created = state.posts.create_post(&post).await?;
	tracing::info!(post_id = ?created.id, "post created");
	Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(
        ("post_id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post", body = CommunityPost),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "posts"
)]
/// GET /posts/{post_id} - Fetch one post.
#[tracing::instrument(skip(state, _partner))]
pub async fn get_post(
	RequirePartner(_partner): RequirePartner,
	State(state): State<AppState>,
	Path(post_id): Path<String>,
) -> Result<Json<CommunityPost>, ServerError> {
	let post = state
		.posts
		.get_post(&post_id)
		.await?
		.ok_or_else(post_not_found)?;
	Ok(Json(post))
}

#[utoipa::path(
    patch,
    path = "/posts/{post_id}",
    params(
        ("post_id" = String, Path, description = "Post ID")
    ),
    request_body = PostUpdate,
    responses(
        (status = 200, description = "Updated post", body = CommunityPost),
        (status = 400, description = "Nothing to update or blank content", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "posts"
)]
/// PATCH /posts/{post_id} - Replace the given fields of a post.
#[tracing::instrument(skip(state, _partner, update))]
pub async fn update_post(
	RequirePartner(_partner): RequirePartner,
	State(state): State<AppState>,
	Path(post_id): Path<String>,
	Json(update): Json<PostUpdate>,
) -> Result<Json<CommunityPost>, ServerError> {
	if update.is_empty() {
		return Err(ServerError::BadRequest("No valid fields to update".to_string()));
	}
	if let Some(reason) = update.validation_error() {
		return Err(ServerError::BadRequest(reason.to_string()));
	}

	let post = state
		.posts
		.update_post(&post_id, &update)
		.await?
		.ok_or_else(post_not_found)?;
	Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    params(
        ("post_id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "posts"
)]
/// DELETE /posts/{post_id} - Delete a post.
#[tracing::instrument(skip(state, partner), fields(uid = %partner.identity.uid))]
pub async fn delete_post(
	RequirePartner(partner): RequirePartner,
	State(state): State<AppState>,
	Path(post_id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
	if !state.posts.delete_post(&post_id).await? {
		return Err(post_not_found());
	}

	tracing::info!(post_id = %post_id, "post deleted");
	Ok(Json(MessageResponse {
		message: "Post deleted successfully".to_string(),
	}))
}

#[utoipa::path(
    get,
    path = "/posts/space/{space_id}",
    params(
        ("space_id" = String, Path, description = "Space ID")
    ),
    responses(
        (status = 200, description = "Posts of the space, newest first", body = [CommunityPost]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "No active partner profile", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "posts"
)]
/// GET /posts/space/{space_id} - List the posts of a space.
#[tracing::instrument(skip(state, _partner))]
pub async fn list_posts_for_space(
	RequirePartner(_partner): RequirePartner,
	State(state): State<AppState>,
	Path(space_id): Path<String>,
) -> Result<Json<Vec<CommunityPost>>, ServerError> {
	let posts = state.posts.list_posts_for_space(&space_id).await?;
	Ok(Json(posts))
}
