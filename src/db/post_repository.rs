//! SQLite post store.

use async_trait::async_trait;
use sqlx::{QueryBuilder, SqlitePool};

use super::post::{NewPost, Post, PostUpdate};
use super::traits::{PostStore, StoreResult};

/// Repository for posts.
#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    /// Create a new PostRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find_all(&self) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>("SELECT id, title, content FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>("SELECT id, title, content FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn create(&self, new_post: &NewPost) -> StoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content) VALUES (?, ?) RETURNING id, title, content",
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn update(&self, id: i64, update: &PostUpdate) -> StoreResult<Option<Post>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_repo() -> PostRepository {
        let db = Database::open_in_memory().await.unwrap();
        PostRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = setup_repo().await;

        let created = repo
            .create(&NewPost::new("Hello", "First post"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordered() {
        let repo = setup_repo().await;
        for i in 1..=3 {
            repo.create(&NewPost::new(format!("Title {i}"), format!("Content {i}")))
                .await
                .unwrap();
        }

        let posts = repo.find_all().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Title 1");
        assert_eq!(posts[2].title, "Title 3");
    }

    #[tokio::test]
    async fn test_update_partial() {
        let repo = setup_repo().await;
        let post = repo.create(&NewPost::new("Old", "Body")).await.unwrap();

        let updated = repo
            .update(post.id, &PostUpdate::new().title("New"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Body");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = setup_repo().await;
        let result = repo
            .update(999, &PostUpdate::new().content("x"))
            .await
            .unwrap();
        assert!(result.is_none());

        let empty = repo.update(999, &PostUpdate::new()).await.unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_repo().await;
        let post = repo.create(&NewPost::new("Title", "Body")).await.unwrap();

        assert!(repo.delete(post.id).await.unwrap());
        assert!(!repo.delete(post.id).await.unwrap());
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
    }
}
