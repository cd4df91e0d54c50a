//! Store traits for inkpost.
//!
//! The services depend on these traits rather than on sqlx directly, so
//! they can be handed any backend (the SQLite repositories in production,
//! hand-written fakes in tests).
//!
//! Outcomes are kept distinguishable: a missing record is `Ok(None)` (or
//! `Ok(false)` for deletes), a unique-constraint hit is
//! [`StoreError::Duplicate`], and everything else is
//! [`StoreError::Database`].

use async_trait::async_trait;
use thiserror::Error;

use super::{NewPost, NewUser, Post, PostUpdate, User};

/// Errors reported by a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Duplicate(String),

    /// Any other backend failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate(db_err.message().to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by ID.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// Get a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert a user. The password must already be hashed.
    async fn create(&self, new_user: &NewUser) -> StoreResult<User>;
}

/// Persistence for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// List all posts ordered by ID.
    async fn find_all(&self) -> StoreResult<Vec<Post>>;

    /// Get a post by ID.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>>;

    /// Insert a post.
    async fn create(&self, new_post: &NewPost) -> StoreResult<Post>;

    /// Update a post. Returns `None` if no post has this ID.
    async fn update(&self, id: i64, update: &PostUpdate) -> StoreResult<Option<Post>>;

    /// Delete a post. Returns whether a post was removed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_duplicate() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Duplicate("UNIQUE constraint failed: users.email".to_string());
        assert_eq!(
            err.to_string(),
            "unique constraint violated: UNIQUE constraint failed: users.email"
        );
    }
}
