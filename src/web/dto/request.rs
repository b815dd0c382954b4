//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth
// ============================================================================

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,
    /// Password.
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: String,
    /// Email address (optional).
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

/// Token refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Logout request.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    pub refresh_token: String,
}

// ============================================================================
// Files
// ============================================================================

/// Directory creation request.
#[derive(Debug, Deserialize)]
pub struct CreateDirectoryRequest {
    /// Name of the new directory.
    pub name: String,
    /// Slash path of the parent directory ("/" for the root).
    #[serde(default = "default_parent_path")]
    pub parent_path: String,
}

fn default_parent_path() -> String {
    "/".to_string()
}

/// Rename request.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    /// The new name.
    pub new_name: String,
}

/// Query parameters addressing a node by path.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    /// Slash path relative to the virtual root.
    #[serde(default = "default_parent_path")]
    pub path: String,
}

// ============================================================================
// Sharing
// ============================================================================

/// Share creation request.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    /// ID of the file to share.
    pub node_id: String,
    /// Username of the recipient.
    pub username: String,
    /// Granted level: "view" or "edit".
    pub permission_level: String,
}

// ============================================================================
// Pages
// ============================================================================

/// Page publication request.
#[derive(Debug, Deserialize)]
pub struct PublishPageRequest {
    /// Public page name, must end in `.html`.
    pub name: String,
    /// The HTML content.
    pub content: String,
}

/// Page content update request.
#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    /// The new HTML content.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            username: "ab".to_string(),
            password: "password123".to_string(),
            nickname: "A".to_string(),
            email: None,
        };
        assert!(req.validate().is_err());

        let req = RegisterRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            nickname: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_directory_defaults_to_root() {
        let req: CreateDirectoryRequest = serde_json::from_str(r#"{"name":"docs"}"#).unwrap();
        assert_eq!(req.parent_path, "/");
    }
}
