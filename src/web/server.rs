//! Web server for VDRIVE.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::db::{Database, RefreshTokenRepository};
use crate::fs::{BlobStore, FsService};
use crate::pages::PageService;
use crate::sharing::ShareService;
use crate::{Result, VdriveError};

use super::handlers::AppState;
use super::middleware::JwtState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from the full configuration.
    pub fn new(config: &Config, db: Arc<Database>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| VdriveError::Config(format!("invalid server address: {e}")))?;

        let max_upload_bytes = config.storage.max_upload_size_mb * 1024 * 1024;

        let fs = FsService::new(
            db.clone(),
            BlobStore::new(&config.storage.files_path),
            max_upload_bytes,
            config.storage.allowed_content_types.clone(),
        );
        let sharing = ShareService::new(db.clone());
        let pages = PageService::new(
            db.clone(),
            BlobStore::new(&config.storage.pages_path),
            max_upload_bytes,
        );

        let app_state = AppState::new(
            db,
            fs,
            sharing,
            pages,
            &config.web.jwt_secret,
            config.web.jwt_access_token_expiry_secs,
            config.web.jwt_refresh_token_expiry_days,
        );

        let jwt_state = Arc::new(JwtState::new(&config.web.jwt_secret));

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            cors_origins: config.web.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the token cleanup background task.
    ///
    /// Runs every hour and removes expired and revoked refresh tokens.
    fn start_token_cleanup_task(db: Arc<Database>) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let repo = RefreshTokenRepository::new(db.pool());
                match repo.cleanup_expired().await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!(
                                deleted_count = count,
                                "Cleaned up expired/revoked refresh tokens"
                            );
                        } else {
                            tracing::debug!("No expired refresh tokens to clean up");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to cleanup refresh tokens");
                    }
                }
            }
        });
    }

    fn build_router(&self) -> axum::Router {
        create_router(
            self.app_state.clone(),
            self.jwt_state.clone(),
            &self.cors_origins,
        )
        .merge(create_health_router())
        .layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let db = self.app_state.db.clone();
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_token_cleanup_task(db);
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let db = self.app_state.db.clone();
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_token_cleanup_task(db);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    async fn create_test_server(temp: &tempfile::TempDir) -> WebServer {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.web.jwt_secret = "test-secret-key".to_string();
        config.storage.files_path = temp.path().join("files").display().to_string();
        config.storage.pages_path = temp.path().join("pages").display().to_string();

        let db = Arc::new(Database::open_in_memory().await.unwrap());
        WebServer::new(&config, db).unwrap()
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let temp = tempfile::tempdir().unwrap();
        let server = create_test_server(&temp).await;
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_binds() {
        let temp = tempfile::tempdir().unwrap();
        let server = create_test_server(&temp).await;
        let addr = server.run_with_addr().await.unwrap();
        assert_ne!(addr.port(), 0);
    }
}
