//! Response DTOs for the Web API.

use serde::Serialize;

use crate::datetime::to_rfc3339;
use crate::fs::Node;
use crate::pages::PublicPage;
use crate::sharing::{SharedFile, SharePermission};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// User information.
    pub user: UserInfo,
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Nickname.
    pub nickname: String,
}

/// Token refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Expiry in seconds.
    pub expires_in: u64,
}

/// Current user response (for /api/auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Nickname.
    pub nickname: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

// ============================================================================
// File DTOs
// ============================================================================

/// A node in API responses.
#[derive(Debug, Serialize)]
pub struct NodeResponse {
    /// Node ID.
    pub id: String,
    /// Node name.
    pub name: String,
    /// Parent directory ID (absent for root children).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Whether the node is a directory.
    pub is_directory: bool,
    /// File size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// Sniffed content type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            name: node.name,
            parent_id: node.parent_id,
            is_directory: node.is_directory,
            size_bytes: node.size_bytes,
            content_type: node.content_type,
            created_at: to_rfc3339(&node.created_at),
            updated_at: to_rfc3339(&node.updated_at),
        }
    }
}

// ============================================================================
// Sharing DTOs
// ============================================================================

/// A sharing grant in API responses.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Grant ID.
    pub id: String,
    /// Shared node ID.
    pub node_id: String,
    /// Recipient user ID.
    pub shared_with_user_id: i64,
    /// Granted level.
    pub permission_level: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<SharePermission> for ShareResponse {
    fn from(share: SharePermission) -> Self {
        Self {
            id: share.id,
            node_id: share.node_id,
            shared_with_user_id: share.shared_with_user_id,
            permission_level: share.permission_level.as_str().to_string(),
            created_at: to_rfc3339(&share.created_at),
        }
    }
}

/// A file shared with the current user.
#[derive(Debug, Serialize)]
pub struct SharedFileResponse {
    /// Grant ID.
    pub share_id: String,
    /// Granted level.
    pub permission_level: String,
    /// When the grant was created (RFC 3339).
    pub shared_at: String,
    /// The shared node's ID.
    pub node_id: String,
    /// The shared node's name.
    pub name: String,
    /// File size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// Sniffed content type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Owning user's username.
    pub owner_username: String,
}

impl From<SharedFile> for SharedFileResponse {
    fn from(file: SharedFile) -> Self {
        Self {
            share_id: file.share_id,
            permission_level: file.permission_level.as_str().to_string(),
            shared_at: to_rfc3339(&file.shared_at),
            node_id: file.node_id,
            name: file.name,
            size_bytes: file.size_bytes,
            content_type: file.content_type,
            owner_username: file.owner_username,
        }
    }
}

// ============================================================================
// Page DTOs
// ============================================================================

/// A published page in API responses.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// Page ID.
    pub id: String,
    /// Public page name.
    pub name: String,
    /// Public URL path for the page.
    pub url: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl PageResponse {
    /// Build a response, rendering the public URL from the owner's username.
    pub fn new(page: PublicPage, owner_username: &str) -> Self {
        Self {
            url: format!("/published/{owner_username}/{}", page.name),
            id: page.id,
            name: page.name,
            created_at: to_rfc3339(&page.created_at),
            updated_at: to_rfc3339(&page.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shape() {
        let resp = ApiResponse::new(vec![1, 2, 3]);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"data":[1,2,3]}"#);
    }
}
