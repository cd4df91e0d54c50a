//! SQLite user store.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::{StoreResult, UserStore};
use super::user::{NewUser, User};

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password) VALUES (?, ?, ?)
             RETURNING id, email, name, password",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreError;
    use crate::Database;

    async fn setup_repo() -> UserRepository {
        let db = Database::open_in_memory().await.unwrap();
        UserRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_create_user() {
        let repo = setup_repo().await;

        let user = repo
            .create(&NewUser::new("ada@example.com", "Ada", "hashedpw"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.password, "hashedpw");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repo = setup_repo().await;

        repo.create(&NewUser::new("ada@example.com", "Ada", "hashedpw"))
            .await
            .unwrap();
        let result = repo
            .create(&NewUser::new("ada@example.com", "Other", "otherpw"))
            .await;

        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_ignores_case() {
        let repo = setup_repo().await;

        repo.create(&NewUser::new("ada@example.com", "Ada", "hashedpw"))
            .await
            .unwrap();
        let result = repo
            .create(&NewUser::new("ADA@Example.com", "Ada", "hashedpw"))
            .await;

        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_repo().await;
        let created = repo
            .create(&NewUser::new("ada@example.com", "Ada", "hashedpw"))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.unwrap().email, "ada@example.com");

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = setup_repo().await;
        repo.create(&NewUser::new("ada@example.com", "Ada", "hashedpw"))
            .await
            .unwrap();

        let found = repo.find_by_email("Ada@Example.COM").await.unwrap();
        assert_eq!(found.unwrap().name, "Ada");

        assert!(repo
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
