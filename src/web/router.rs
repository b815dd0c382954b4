//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_directory, create_share, delete_node, download, get_page, list_directory, list_pages,
    list_users, login, logout, me, overwrite, publish_page, refresh, register, rename,
    revoke_share, serve_published, shared_with_me, stat_path, unpublish_page, update_page, upload,
    AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, security_headers, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/users", get(list_users));

    let file_routes = Router::new()
        .route("/", get(list_directory))
        .route("/stat", get(stat_path))
        .route("/directories", post(create_directory))
        .route("/upload", post(upload))
        .route("/:id/download", get(download))
        .route("/:id/content", put(overwrite))
        .route("/:id", patch(rename).delete(delete_node));

    let sharing_routes = Router::new()
        .route("/", post(create_share))
        .route("/shared-with-me", get(shared_with_me))
        .route("/:id", delete(revoke_share));

    let page_routes = Router::new()
        .route("/", post(publish_page).get(list_pages))
        .route("/:id", get(get_page).put(update_page).delete(unpublish_page));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/files", file_routes)
        .nest("/sharing", sharing_routes)
        .nest("/pages", page_routes);

    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .route("/published/:username/:filename", get(serve_published))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
    }
}
