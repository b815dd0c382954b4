//! Published page handlers.
//!
//! The management API is owner-scoped; the `/published/...` serving route is
//! world-readable and sets its own caching and hardening headers, since the
//! content is user-authored HTML served to anonymous visitors.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{ApiResponse, PageResponse, PublishPageRequest, UpdatePageRequest};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/pages - Publish a page.
pub async fn publish_page(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<PublishPageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PageResponse>>), ApiError> {
    let page = state
        .pages
        .publish(claims.sub, &req.name, req.content.as_bytes())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(PageResponse::new(page, &claims.username))),
    ))
}

/// GET /api/pages - List the current user's pages.
pub async fn list_pages(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<PageResponse>>>, ApiError> {
    let pages = state.pages.list(claims.sub).await?;
    let responses = pages
        .into_iter()
        .map(|p| PageResponse::new(p, &claims.username))
        .collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/pages/:id - Get one of the current user's pages.
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let page = state.pages.get(claims.sub, &id).await?;
    Ok(Json(ApiResponse::new(PageResponse::new(
        page,
        &claims.username,
    ))))
}

/// PUT /api/pages/:id - Replace a page's content.
pub async fn update_page(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePageRequest>,
) -> Result<Json<ApiResponse<PageResponse>>, ApiError> {
    let page = state
        .pages
        .update(claims.sub, &id, req.content.as_bytes())
        .await?;
    Ok(Json(ApiResponse::new(PageResponse::new(
        page,
        &claims.username,
    ))))
}

/// DELETE /api/pages/:id - Unpublish a page.
pub async fn unpublish_page(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.pages.unpublish(claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /published/:username/:filename - Serve a published page. Public.
pub async fn serve_published(
    State(state): State<Arc<AppState>>,
    Path((username, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let content = state.pages.serve(&username, &filename).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(header::X_FRAME_OPTIONS, "DENY")
        .header(header::CONTENT_SECURITY_POLICY, "default-src 'self';")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build page response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
