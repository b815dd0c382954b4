//! Sharing grant repository for VDRIVE.

use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::{Result, VdriveError};

use super::permission::{PermissionLevel, SharePermission, SharedFile};

/// Repository for sharing grants.
pub struct ShareRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ShareRepository<'a> {
    /// Create a new ShareRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new grant.
    ///
    /// A second grant for the same node and recipient violates the unique
    /// constraint and surfaces as a `Conflict`.
    pub async fn create(
        &self,
        node_id: &str,
        shared_with_user_id: i64,
        granted_by_user_id: i64,
        level: PermissionLevel,
    ) -> Result<SharePermission> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO share_permissions
                (id, node_id, shared_with_user_id, granted_by_user_id,
                 permission_level, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(node_id)
        .bind(shared_with_user_id)
        .bind(granted_by_user_id)
        .bind(level)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("share".to_string()))
    }

    /// Get a grant by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<SharePermission>> {
        let share = sqlx::query_as::<_, SharePermission>(
            "SELECT * FROM share_permissions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(share)
    }

    /// Get the level granted to a user on a node, if any.
    ///
    /// Grants on soft-deleted nodes do not count.
    pub async fn get_level(
        &self,
        node_id: &str,
        user_id: i64,
    ) -> Result<Option<PermissionLevel>> {
        let level = sqlx::query_scalar::<_, PermissionLevel>(
            "SELECT s.permission_level
             FROM share_permissions s
             JOIN nodes n ON n.id = s.node_id
             WHERE s.node_id = ? AND s.shared_with_user_id = ? AND n.deleted_at IS NULL",
        )
        .bind(node_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(level)
    }

    /// List the live files shared with a user, newest grant first.
    pub async fn list_shared_with(&self, user_id: i64) -> Result<Vec<SharedFile>> {
        let files = sqlx::query_as::<_, SharedFile>(
            "SELECT s.id AS share_id, s.permission_level, s.created_at AS shared_at,
                    n.id AS node_id, n.name, n.size_bytes, n.content_type,
                    n.owner_id, u.username AS owner_username
             FROM share_permissions s
             JOIN nodes n ON n.id = s.node_id
             JOIN users u ON u.id = n.owner_id
             WHERE s.shared_with_user_id = ? AND n.deleted_at IS NULL
             ORDER BY s.created_at DESC, s.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    /// Delete a grant by ID.
    ///
    /// Returns `true` if a grant was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM share_permissions WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
