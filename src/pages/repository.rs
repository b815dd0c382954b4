//! Published page repository for VDRIVE.

use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::{Result, VdriveError};

use super::page::PublicPage;

/// Repository for published pages.
pub struct PageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PageRepository<'a> {
    /// Create a new PageRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new page record.
    ///
    /// Publishing a second page under the same name for the same owner
    /// violates the unique constraint and surfaces as a `Conflict`.
    pub async fn create(
        &self,
        owner_id: i64,
        name: &str,
        physical_name: &str,
    ) -> Result<PublicPage> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO public_pages
                (id, owner_id, name, physical_name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(owner_id)
        .bind(name)
        .bind(physical_name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("page".to_string()))
    }

    /// Get a page by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<PublicPage>> {
        let page = sqlx::query_as::<_, PublicPage>("SELECT * FROM public_pages WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(page)
    }

    /// Get a page by its owner's username and its public name.
    ///
    /// This is the lookup the public serving route performs. The username
    /// comparison is case-insensitive, matching login.
    pub async fn get_by_username_and_name(
        &self,
        username: &str,
        name: &str,
    ) -> Result<Option<PublicPage>> {
        let page = sqlx::query_as::<_, PublicPage>(
            "SELECT p.* FROM public_pages p
             JOIN users u ON u.id = p.owner_id
             WHERE u.username = ? COLLATE NOCASE AND p.name = ?",
        )
        .bind(username)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(page)
    }

    /// List an owner's pages by name.
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<PublicPage>> {
        let pages = sqlx::query_as::<_, PublicPage>(
            "SELECT * FROM public_pages WHERE owner_id = ? ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(pages)
    }

    /// Stamp a page's `updated_at` after its content was replaced.
    pub async fn touch(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE public_pages SET updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(VdriveError::NotFound("page".to_string()));
        }
        Ok(())
    }

    /// Delete a page record.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM public_pages WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
