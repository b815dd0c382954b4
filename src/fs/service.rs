//! Filesystem service for VDRIVE.
//!
//! Ties the node repository, blob store, and content sniffing together into
//! the operations the web layer exposes. Access control lives here: owners
//! can do everything with their own nodes, sharing grants extend read (and
//! for edit grants, write) access to other users' files.

use std::sync::Arc;

use tracing::{info, warn};

use crate::db::Database;
use crate::sharing::{PermissionLevel, ShareRepository};
use crate::{Result, VdriveError};

use super::node::{validate_node_name, NewNode, Node};
use super::path::split_path;
use super::repository::NodeRepository;
use super::sniff::sniff_content_type;
use super::storage::BlobStore;

/// High-level filesystem operations.
#[derive(Clone)]
pub struct FsService {
    db: Arc<Database>,
    store: BlobStore,
    max_upload_bytes: u64,
    allowed_content_types: Vec<String>,
}

impl FsService {
    /// Create a new FsService.
    pub fn new(
        db: Arc<Database>,
        store: BlobStore,
        max_upload_bytes: u64,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            db,
            store,
            max_upload_bytes,
            allowed_content_types,
        }
    }

    fn nodes(&self) -> NodeRepository<'_> {
        NodeRepository::new(self.db.pool())
    }

    fn shares(&self) -> ShareRepository<'_> {
        ShareRepository::new(self.db.pool())
    }

    /// Create a directory under the given parent path.
    pub async fn create_directory(
        &self,
        owner_id: i64,
        parent_path: &str,
        name: &str,
    ) -> Result<Node> {
        validate_node_name(name)?;

        let segments = split_path(parent_path)?;
        let parent_id = self.nodes().resolve_directory(owner_id, &segments).await?;

        let node = self
            .nodes()
            .create(&NewNode::directory(owner_id, parent_id, name))
            .await?;

        info!(owner_id, name = %node.name, "directory created");
        Ok(node)
    }

    /// Upload a file under the given parent path.
    ///
    /// The stored content type is sniffed from the bytes and checked against
    /// the allowlist. The node row is inserted before the blob is written;
    /// if the blob write fails the row is removed again so no orphan
    /// metadata survives.
    pub async fn upload(
        &self,
        owner_id: i64,
        parent_path: &str,
        name: &str,
        content: &[u8],
    ) -> Result<Node> {
        validate_node_name(name)?;

        if content.len() as u64 > self.max_upload_bytes {
            return Err(VdriveError::Validation(format!(
                "file exceeds the upload limit of {} bytes",
                self.max_upload_bytes
            )));
        }

        let segments = split_path(parent_path)?;
        let parent_id = self.nodes().resolve_directory(owner_id, &segments).await?;

        let content_type = sniff_content_type(content)?;
        if !self.allowed_content_types.iter().any(|t| t == &content_type) {
            return Err(VdriveError::Validation(format!(
                "content type {content_type} is not allowed"
            )));
        }

        let node = self
            .nodes()
            .create(&NewNode::file(
                owner_id,
                parent_id,
                name,
                content.len() as i64,
                content_type,
            ))
            .await?;

        if let Err(e) = self.store.put(&owner_id.to_string(), &node.id, content) {
            warn!(node_id = %node.id, error = %e, "blob write failed, removing node");
            self.nodes().hard_delete(&node.id).await?;
            // Best-effort: a partial blob may exist
            let _ = self.store.delete(&owner_id.to_string(), &node.id);
            return Err(e);
        }

        info!(owner_id, node_id = %node.id, name = %node.name, "file uploaded");
        Ok(node)
    }

    /// Get the node at a slash path.
    ///
    /// The root itself has no node and cannot be stat'ed.
    pub async fn stat_path(&self, owner_id: i64, path: &str) -> Result<Node> {
        let segments = split_path(path)?;
        self.nodes()
            .resolve_path(owner_id, &segments)
            .await?
            .ok_or_else(|| VdriveError::Validation("the root has no metadata".into()))
    }

    /// List the children of the directory at a slash path.
    pub async fn list_directory(&self, owner_id: i64, path: &str) -> Result<Vec<Node>> {
        let segments = split_path(path)?;
        let dir_id = self.nodes().resolve_directory(owner_id, &segments).await?;
        self.nodes().list_children(owner_id, dir_id.as_deref()).await
    }

    /// Download a file's content.
    ///
    /// Allowed for the owner and for users holding any sharing grant on the
    /// node.
    pub async fn download(&self, requester_id: i64, node_id: &str) -> Result<(Node, Vec<u8>)> {
        let node = self.require_readable(requester_id, node_id).await?;

        if node.is_directory {
            return Err(VdriveError::Validation(
                "directories have no content".into(),
            ));
        }

        let content = self.store.get(&node.owner_id.to_string(), &node.id)?;
        Ok((node, content))
    }

    /// Rename a node.
    ///
    /// Allowed for the owner and for users holding an edit grant. Renaming
    /// to the current name is rejected as a no-op.
    pub async fn rename(&self, requester_id: i64, node_id: &str, new_name: &str) -> Result<Node> {
        validate_node_name(new_name)?;

        let node = self.require_writable(requester_id, node_id).await?;

        if node.name == new_name {
            return Err(VdriveError::Validation(
                "new name is identical to the current name".into(),
            ));
        }

        self.nodes().rename(&node.id, new_name).await?;
        self.nodes()
            .get_any_live(&node.id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))
    }

    /// Replace a file's content.
    ///
    /// Allowed for the owner and for users holding an edit grant. The new
    /// content goes through the same sniffing and allowlist as an upload.
    pub async fn overwrite(
        &self,
        requester_id: i64,
        node_id: &str,
        content: &[u8],
    ) -> Result<Node> {
        if content.len() as u64 > self.max_upload_bytes {
            return Err(VdriveError::Validation(format!(
                "file exceeds the upload limit of {} bytes",
                self.max_upload_bytes
            )));
        }

        let node = self.require_writable(requester_id, node_id).await?;
        if node.is_directory {
            return Err(VdriveError::Validation(
                "directories have no content".into(),
            ));
        }

        let content_type = sniff_content_type(content)?;
        if !self.allowed_content_types.iter().any(|t| t == &content_type) {
            return Err(VdriveError::Validation(format!(
                "content type {content_type} is not allowed"
            )));
        }

        self.store
            .put(&node.owner_id.to_string(), &node.id, content)?;
        self.nodes()
            .update_content(&node.id, content.len() as i64, &content_type)
            .await?;

        self.nodes()
            .get_any_live(&node.id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))
    }

    /// Soft-delete a node. Owner only.
    ///
    /// The blob (if any) is kept on disk; only the metadata row is marked
    /// deleted, so the operation is reversible at the storage level.
    pub async fn delete(&self, owner_id: i64, node_id: &str) -> Result<()> {
        let node = self
            .nodes()
            .get_live(owner_id, node_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))?;

        self.nodes().soft_delete(&node.id).await?;
        info!(owner_id, node_id = %node.id, "node soft-deleted");
        Ok(())
    }

    /// Fetch a live node the requester may read: their own, or one shared
    /// with them at any level.
    async fn require_readable(&self, requester_id: i64, node_id: &str) -> Result<Node> {
        let node = self
            .nodes()
            .get_any_live(node_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))?;

        if node.owner_id == requester_id {
            return Ok(node);
        }

        match self.shares().get_level(node_id, requester_id).await? {
            Some(_) => Ok(node),
            None => Err(VdriveError::Permission("access denied".into())),
        }
    }

    /// Fetch a live node the requester may modify: their own, or one shared
    /// with them at the edit level.
    async fn require_writable(&self, requester_id: i64, node_id: &str) -> Result<Node> {
        let node = self
            .nodes()
            .get_any_live(node_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))?;

        if node.owner_id == requester_id {
            return Ok(node);
        }

        match self.shares().get_level(node_id, requester_id).await? {
            Some(PermissionLevel::Edit) => Ok(node),
            _ => Err(VdriveError::Permission("access denied".into())),
        }
    }
}
