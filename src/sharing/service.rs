//! Sharing service for VDRIVE.
//!
//! Grants are created by a file's owner for another user, at either the
//! view or the edit level. Directories cannot be shared; a recipient sees
//! shared files as a flat list, not grafted into their own tree.

use std::sync::Arc;

use tracing::info;

use crate::db::{Database, UserRepository};
use crate::fs::NodeRepository;
use crate::{Result, VdriveError};

use super::permission::{PermissionLevel, SharePermission, SharedFile};
use super::repository::ShareRepository;

/// High-level sharing operations.
#[derive(Clone)]
pub struct ShareService {
    db: Arc<Database>,
}

impl ShareService {
    /// Create a new ShareService.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn shares(&self) -> ShareRepository<'_> {
        ShareRepository::new(self.db.pool())
    }

    /// Share a file with another user.
    ///
    /// Only the owner can grant access, only live files can be shared, and
    /// the recipient must be a different existing user. A second grant for
    /// the same recipient is a conflict.
    pub async fn share(
        &self,
        owner_id: i64,
        node_id: &str,
        target_username: &str,
        level: PermissionLevel,
    ) -> Result<SharePermission> {
        let nodes = NodeRepository::new(self.db.pool());
        let node = nodes
            .get_any_live(node_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("node".to_string()))?;

        if node.owner_id != owner_id {
            return Err(VdriveError::Permission(
                "only the owner can share a file".into(),
            ));
        }
        if node.is_directory {
            return Err(VdriveError::Validation(
                "directories cannot be shared".into(),
            ));
        }

        let users = UserRepository::new(self.db.pool());
        let target = users
            .get_by_username(target_username)
            .await?
            .ok_or_else(|| VdriveError::NotFound(format!("user {target_username}")))?;

        if target.id == owner_id {
            return Err(VdriveError::Validation(
                "cannot share a file with yourself".into(),
            ));
        }

        let share = self
            .shares()
            .create(node_id, target.id, owner_id, level)
            .await?;

        info!(
            owner_id,
            node_id,
            shared_with = %target.username,
            level = level.as_str(),
            "file shared"
        );
        Ok(share)
    }

    /// List the live files shared with a user.
    pub async fn shared_with_me(&self, user_id: i64) -> Result<Vec<SharedFile>> {
        self.shares().list_shared_with(user_id).await
    }

    /// Revoke a grant. Only the granting owner may revoke it.
    pub async fn revoke(&self, requester_id: i64, share_id: &str) -> Result<()> {
        let share = self
            .shares()
            .get_by_id(share_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("share".to_string()))?;

        if share.granted_by_user_id != requester_id {
            return Err(VdriveError::Permission(
                "only the granting owner can revoke a share".into(),
            ));
        }

        self.shares().delete(share_id).await?;
        info!(requester_id, share_id, "share revoked");
        Ok(())
    }
}
