//! Filesystem node model for VDRIVE.
//!
//! A node is a single entry in a user's virtual tree: either a directory or
//! a file. Files carry size and content type; directories carry neither.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Result, VdriveError};

/// Maximum length of a node name in characters.
pub const MAX_NODE_NAME_LENGTH: usize = 255;

/// A file or directory in a user's virtual tree.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Node {
    /// Node ID (UUIDv4).
    pub id: String,
    /// Owning user ID.
    pub owner_id: i64,
    /// Parent directory ID, or None for a child of the virtual root.
    pub parent_id: Option<String>,
    /// Node name (unique among live siblings).
    pub name: String,
    /// Whether this node is a directory.
    pub is_directory: bool,
    /// Content size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// Sniffed content type (files only).
    pub content_type: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp, or None if live.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Node {
    /// Whether this node is live (not soft-deleted).
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Data for creating a new node.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// Owning user ID.
    pub owner_id: i64,
    /// Parent directory ID, or None for a root child.
    pub parent_id: Option<String>,
    /// Node name.
    pub name: String,
    /// Whether the node is a directory.
    pub is_directory: bool,
    /// Content size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// Sniffed content type (files only).
    pub content_type: Option<String>,
}

impl NewNode {
    /// Create a new directory node.
    pub fn directory(owner_id: i64, parent_id: Option<String>, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            parent_id,
            name: name.into(),
            is_directory: true,
            size_bytes: None,
            content_type: None,
        }
    }

    /// Create a new file node.
    pub fn file(
        owner_id: i64,
        parent_id: Option<String>,
        name: impl Into<String>,
        size_bytes: i64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            parent_id,
            name: name.into(),
            is_directory: false,
            size_bytes: Some(size_bytes),
            content_type: Some(content_type.into()),
        }
    }
}

/// Validate a node name.
///
/// Names are 1-255 characters drawn from alphanumerics, underscore, dot,
/// hyphen, and space. Slashes are excluded by construction so a name can
/// never span path segments.
pub fn validate_node_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VdriveError::Validation("node name must not be empty".into()));
    }
    if name.chars().count() > MAX_NODE_NAME_LENGTH {
        return Err(VdriveError::Validation(format!(
            "node name must be at most {MAX_NODE_NAME_LENGTH} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | ' '))
    {
        return Err(VdriveError::Validation(format!(
            "invalid node name: {name:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_builders() {
        let dir = NewNode::directory(1, None, "docs");
        assert!(dir.is_directory);
        assert!(dir.size_bytes.is_none());

        let file = NewNode::file(1, Some("p".to_string()), "a.txt", 42, "text/plain");
        assert!(!file.is_directory);
        assert_eq!(file.size_bytes, Some(42));
        assert_eq!(file.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_validate_node_name_accepts_normal_names() {
        assert!(validate_node_name("report.pdf").is_ok());
        assert!(validate_node_name("My Documents").is_ok());
        assert!(validate_node_name("notes_2024-01.txt").is_ok());
        assert!(validate_node_name("a").is_ok());
    }

    #[test]
    fn test_validate_node_name_rejects_bad_names() {
        assert!(validate_node_name("").is_err());
        assert!(validate_node_name("a/b").is_err());
        assert!(validate_node_name("bad\0name").is_err());
        assert!(validate_node_name("tab\tname").is_err());
        assert!(validate_node_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_node_name_max_length() {
        assert!(validate_node_name(&"x".repeat(255)).is_ok());
    }
}
