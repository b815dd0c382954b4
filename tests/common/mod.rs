//! Test helpers for Web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use vdrive::fs::{BlobStore, FsService};
use vdrive::pages::PageService;
use vdrive::sharing::ShareService;
use vdrive::web::handlers::AppState;
use vdrive::web::middleware::JwtState;
use vdrive::web::router::create_router;
use vdrive::Database;

const JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// A running test application.
///
/// Keeps the blob storage tempdir alive for the duration of the test.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<Database>,
    _temp: TempDir,
}

/// Create a test server with an in-memory database and temp blob storage.
pub async fn spawn_app() -> TestApp {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let allowed = vec![
        "text/plain".to_string(),
        "text/html".to_string(),
        "application/pdf".to_string(),
        "image/png".to_string(),
    ];

    let fs = FsService::new(
        db.clone(),
        BlobStore::new(temp.path().join("files")),
        10 * 1024 * 1024,
        allowed,
    );
    let sharing = ShareService::new(db.clone());
    let pages = PageService::new(
        db.clone(),
        BlobStore::new(temp.path().join("pages")),
        10 * 1024 * 1024,
    );

    let app_state = Arc::new(AppState::new(
        db.clone(),
        fs,
        sharing,
        pages,
        JWT_SECRET,
        900,
        7,
    ));
    let jwt_state = Arc::new(JwtState::new(JWT_SECRET));

    let router = create_router(app_state, jwt_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db,
        _temp: temp,
    }
}

/// Register a test user and return the registration response body.
pub async fn register_test_user(server: &TestServer, username: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "password": "password123",
            "nickname": username
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Get the access token from a registration or login response.
pub fn access_token(response: &Value) -> String {
    response["data"]["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string()
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
