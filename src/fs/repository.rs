//! Node repository for VDRIVE.
//!
//! All queries here are owner-scoped and, unless stated otherwise, see only
//! live rows. Soft-deleted nodes stay in the table but are invisible to
//! lookup, listing, and path resolution.

use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::{Result, VdriveError};

use super::node::{NewNode, Node};

/// Repository for virtual filesystem nodes.
pub struct NodeRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> NodeRepository<'a> {
    /// Create a new NodeRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new node.
    ///
    /// A live sibling with the same name makes the unique index fire, which
    /// surfaces as a `Conflict` error.
    pub async fn create(&self, new_node: &NewNode) -> Result<Node> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO nodes
                (id, owner_id, parent_id, name, is_directory, size_bytes,
                 content_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(new_node.owner_id)
        .bind(&new_node.parent_id)
        .bind(&new_node.name)
        .bind(new_node.is_directory)
        .bind(new_node.size_bytes)
        .bind(&new_node.content_type)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        self.get_live(new_node.owner_id, &id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))
    }

    /// Get a live node by ID, regardless of owner.
    ///
    /// Used when access may be granted through sharing rather than
    /// ownership.
    pub async fn get_any_live(&self, id: &str) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(node)
    }

    /// Get a node by ID regardless of deletion state.
    ///
    /// Soft deletion never physically erases a row; this is the one
    /// accessor through which deleted rows stay reachable, for audit and
    /// restore tooling. Not used on any request path.
    pub async fn get_any_by_id(&self, id: &str) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(node)
    }

    /// Get a live node by ID, scoped to its owner.
    pub async fn get_live(&self, owner_id: i64, id: &str) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE id = ? AND owner_id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(node)
    }

    /// Find a live child of the given parent by name.
    ///
    /// `parent_id = None` means a child of the virtual root. `IS ?` makes
    /// the NULL parent compare correctly.
    pub async fn find_child(
        &self,
        owner_id: i64,
        parent_id: Option<&str>,
        name: &str,
    ) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes
             WHERE owner_id = ? AND parent_id IS ? AND name = ? AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(parent_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(node)
    }

    /// List the live children of a directory, directories first, then by
    /// name in byte order.
    pub async fn list_children(
        &self,
        owner_id: i64,
        parent_id: Option<&str>,
    ) -> Result<Vec<Node>> {
        let nodes = sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes
             WHERE owner_id = ? AND parent_id IS ? AND deleted_at IS NULL
             ORDER BY is_directory DESC, name ASC",
        )
        .bind(owner_id)
        .bind(parent_id)
        .fetch_all(self.pool)
        .await?;

        Ok(nodes)
    }

    /// Rename a live node in place.
    ///
    /// The unique sibling index turns a name collision into a `Conflict`.
    pub async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE nodes SET name = ?, updated_at = ?
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(new_name)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(VdriveError::NotFound("node".to_string()));
        }
        Ok(())
    }

    /// Soft-delete a live node by stamping `deleted_at`.
    ///
    /// Descendants are left untouched; they become unreachable because path
    /// resolution stops at the deleted ancestor. Deleting an already
    /// deleted node reports `NotFound`.
    pub async fn soft_delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE nodes SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(VdriveError::NotFound("node".to_string()));
        }
        Ok(())
    }

    /// Hard-delete a node row.
    ///
    /// Only used to compensate a failed upload, where the node was inserted
    /// but its blob could not be written.
    pub async fn hard_delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM nodes WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Update a file node's content metadata after an overwrite.
    pub async fn update_content(
        &self,
        id: &str,
        size_bytes: i64,
        content_type: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE nodes SET size_bytes = ?, content_type = ?, updated_at = ?
             WHERE id = ? AND is_directory = 0 AND deleted_at IS NULL",
        )
        .bind(size_bytes)
        .bind(content_type)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(VdriveError::NotFound("node".to_string()));
        }
        Ok(())
    }

    /// Resolve a slash path to a node, walking live nodes segment by
    /// segment.
    ///
    /// Returns `None` for the root path itself. Every intermediate segment
    /// must be a live directory; an intermediate file is a validation
    /// error, a missing segment is `NotFound`.
    pub async fn resolve_path(
        &self,
        owner_id: i64,
        segments: &[String],
    ) -> Result<Option<Node>> {
        let mut current: Option<Node> = None;

        for (i, segment) in segments.iter().enumerate() {
            if let Some(node) = &current {
                if !node.is_directory {
                    return Err(VdriveError::Validation(format!(
                        "{:?} is not a directory",
                        node.name
                    )));
                }
            }

            let parent_id = current.as_ref().map(|n| n.id.as_str());
            let child = self.find_child(owner_id, parent_id, segment).await?;
            match child {
                Some(node) => current = Some(node),
                None => {
                    let missing = segments[..=i].join("/");
                    return Err(VdriveError::NotFound(format!("path /{missing}")));
                }
            }
        }

        Ok(current)
    }

    /// Resolve a slash path that must name a directory (or the root).
    ///
    /// Returns the directory's node ID, or `None` for the root.
    pub async fn resolve_directory(
        &self,
        owner_id: i64,
        segments: &[String],
    ) -> Result<Option<String>> {
        match self.resolve_path(owner_id, segments).await? {
            None => Ok(None),
            Some(node) if node.is_directory => Ok(Some(node.id)),
            Some(node) => Err(VdriveError::Validation(format!(
                "{:?} is not a directory",
                node.name
            ))),
        }
    }
}
