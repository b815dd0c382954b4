//! Sharing grant model for VDRIVE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, VdriveError};

/// What a grant lets the recipient do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read and download the file.
    View,
    /// View, plus rename and replace the file's content.
    Edit,
}

impl PermissionLevel {
    /// Parse a level from its wire form.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            other => Err(VdriveError::Validation(format!(
                "invalid permission level: {other:?}"
            ))),
        }
    }

    /// Wire form of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

/// A sharing grant on a single file.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SharePermission {
    /// Grant ID (UUIDv4).
    pub id: String,
    /// The shared node.
    pub node_id: String,
    /// The recipient.
    pub shared_with_user_id: i64,
    /// The granting user (always the node's owner).
    pub granted_by_user_id: i64,
    /// Granted level.
    pub permission_level: PermissionLevel,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A shared file as seen by its recipient, flattened for listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SharedFile {
    /// Grant ID.
    pub share_id: String,
    /// Granted level.
    pub permission_level: PermissionLevel,
    /// When the grant was created.
    pub shared_at: DateTime<Utc>,
    /// The shared node's ID.
    pub node_id: String,
    /// The shared node's name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: Option<i64>,
    /// Sniffed content type.
    pub content_type: Option<String>,
    /// Owning user's ID.
    pub owner_id: i64,
    /// Owning user's username.
    pub owner_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!(PermissionLevel::parse("view").unwrap(), PermissionLevel::View);
        assert_eq!(PermissionLevel::parse("edit").unwrap(), PermissionLevel::Edit);
        assert!(PermissionLevel::parse("admin").is_err());
        assert!(PermissionLevel::parse("View").is_err());
    }

    #[test]
    fn test_as_str_round_trip() {
        for level in [PermissionLevel::View, PermissionLevel::Edit] {
            assert_eq!(PermissionLevel::parse(level.as_str()).unwrap(), level);
        }
    }
}
