//! Sharing handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::sharing::PermissionLevel;
use crate::web::dto::{ApiResponse, ShareRequest, SharedFileResponse, ShareResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/sharing - Share a file with another user.
pub async fn create_share(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareResponse>>), ApiError> {
    let level = PermissionLevel::parse(&req.permission_level)?;

    let share = state
        .sharing
        .share(claims.sub, &req.node_id, &req.username, level)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ShareResponse::from(share))),
    ))
}

/// GET /api/sharing/shared-with-me - List files shared with the current user.
pub async fn shared_with_me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<SharedFileResponse>>>, ApiError> {
    let files = state.sharing.shared_with_me(claims.sub).await?;
    let responses = files.into_iter().map(SharedFileResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// DELETE /api/sharing/:id - Revoke a sharing grant.
pub async fn revoke_share(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sharing.revoke(claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
