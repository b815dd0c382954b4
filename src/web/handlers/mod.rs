//! Request handlers for the Web API.

mod auth;
mod files;
mod pages;
mod sharing;

pub use auth::{list_users, login, logout, me, refresh, register};
pub use files::{
    create_directory, delete_node, download, list_directory, overwrite, rename, stat_path, upload,
};
pub use pages::{get_page, list_pages, publish_page, serve_published, unpublish_page, update_page};
pub use sharing::{create_share, revoke_share, shared_with_me};

use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::db::Database;
use crate::fs::FsService;
use crate::pages::PageService;
use crate::sharing::ShareService;
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Filesystem service.
    pub fs: FsService,
    /// Sharing service.
    pub sharing: ShareService,
    /// Publication service.
    pub pages: PageService,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Refresh token expiry in days.
    pub refresh_token_expiry: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Arc<Database>,
        fs: FsService,
        sharing: ShareService,
        pages: PageService,
        jwt_secret: &str,
        access_expiry: u64,
        refresh_expiry: u64,
    ) -> Self {
        Self {
            db,
            fs,
            sharing,
            pages,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user_id: i64, username: &str) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Generate a refresh token.
    pub fn generate_refresh_token(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
