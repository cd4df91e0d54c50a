//! Post handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::db::Post;
use crate::web::dto::{CreatePostRequest, UpdatePostRequest, ValidatedJson};
use crate::web::error::ApiError;

/// GET /posts - List posts.
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

/// GET /posts/:id - Get a post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get(id).await?))
}

/// POST /posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.posts.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /posts/:id - Update a post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.update(id, req.into()).await?))
}

/// DELETE /posts/:id - Delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::OK)
}
