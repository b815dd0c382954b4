//! User repository for VDRIVE.
//!
//! This module provides CRUD operations for users in the database.

use super::user::{NewUser, User};
use super::DbPool;
use crate::{Result, VdriveError};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, nickname, email) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.nickname)
        .bind(&new_user.email)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.kind() == sqlx::error::ErrorKind::UniqueViolation =>
            {
                VdriveError::Conflict("username already taken".to_string())
            }
            _ => VdriveError::Database(e.to_string()),
        })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, nickname, email, created_at, last_login, is_active
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| VdriveError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, nickname, email, created_at, last_login, is_active
             FROM users WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| VdriveError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all active users ordered by username.
    pub async fn list_active(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, nickname, email, created_at, last_login, is_active
             FROM users WHERE is_active = 1 ORDER BY username ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| VdriveError::Database(e.to_string()))?;

        Ok(users)
    }

    /// Update the last login timestamp to the current time.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| VdriveError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("alice", "hash", "Alice").with_email("alice@example.com"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.nickname, "Alice");
        assert_eq!(user.email, Some("alice@example.com".to_string()));
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflict() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("bob", "hash", "Bob")).await.unwrap();
        let result = repo.create(&NewUser::new("bob", "hash2", "Bob Again")).await;

        assert!(matches!(result, Err(VdriveError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_by_username_case_insensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Carol", "hash", "Carol"))
            .await
            .unwrap();

        let found = repo.get_by_username("carol").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "Carol");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let found = repo.get_by_id(9999).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_active() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("zed", "hash", "Zed")).await.unwrap();
        repo.create(&NewUser::new("amy", "hash", "Amy")).await.unwrap();

        let users = repo.list_active().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "amy");
        assert_eq!(users[1].username, "zed");
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("dave", "hash", "Dave")).await.unwrap();
        assert!(user.last_login.is_none());

        repo.update_last_login(user.id).await.unwrap();

        let updated = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(updated.last_login.is_some());
    }
}
