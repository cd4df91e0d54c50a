//! Post service for inkpost.

use std::sync::Arc;

use tracing::{error, info};

use crate::db::{NewPost, Post, PostStore, PostUpdate, StoreError};
use crate::error::{ServiceError, ServiceResult};

/// CRUD operations over posts.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    /// Create a new post service.
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// List all posts.
    pub async fn list(&self) -> ServiceResult<Vec<Post>> {
        self.posts.find_all().await.map_err(internal)
    }

    /// Get a post by ID.
    pub async fn get(&self, id: i64) -> ServiceResult<Post> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(ServiceError::NotFound("Post"))
    }

    /// Create a new post.
    pub async fn create(&self, new_post: NewPost) -> ServiceResult<Post> {
        let post = self.posts.create(&new_post).await.map_err(internal)?;
        info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Apply a partial update to a post.
    pub async fn update(&self, id: i64, update: PostUpdate) -> ServiceResult<Post> {
        let post = self
            .posts
            .update(id, &update)
            .await
            .map_err(internal)?
            .ok_or(ServiceError::NotFound("Post"))?;
        info!(post_id = id, "Post updated");
        Ok(post)
    }

    /// Delete a post.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.posts.delete(id).await.map_err(internal)? {
            return Err(ServiceError::NotFound("Post"));
        }
        info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn internal(e: StoreError) -> ServiceError {
    error!(error = %e, "Post store failure");
    ServiceError::InternalFailure
}
