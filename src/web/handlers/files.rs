//! File and directory handlers.

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, CreateDirectoryRequest, NodeResponse, PathQuery, RenameRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// GET /api/files - List a directory's children by path.
pub async fn list_directory(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<Vec<NodeResponse>>>, ApiError> {
    let nodes = state.fs.list_directory(claims.sub, &query.path).await?;
    let responses = nodes.into_iter().map(NodeResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/files/stat - Get a node's metadata by path.
pub async fn stat_path(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let node = state.fs.stat_path(claims.sub, &query.path).await?;
    Ok(Json(ApiResponse::new(NodeResponse::from(node))))
}

/// POST /api/files/directories - Create a directory.
pub async fn create_directory(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateDirectoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NodeResponse>>), ApiError> {
    let node = state
        .fs
        .create_directory(claims.sub, &req.parent_path, &req.name)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(NodeResponse::from(node))),
    ))
}

/// POST /api/files/upload - Upload a file (multipart).
///
/// Accepts a `file` part (required) plus optional `parent_path` and `name`
/// text parts. When `name` is absent the part's filename is used.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<NodeResponse>>), ApiError> {
    let mut parent_path = "/".to_string();
    let mut name: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "parent_path" => {
                parent_path = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid parent_path: {e}")))?;
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid name: {e}")))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid file content: {e}")))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let content = content.ok_or_else(|| ApiError::bad_request("Missing file part"))?;
    let name = name
        .or(file_name)
        .ok_or_else(|| ApiError::bad_request("Missing file name"))?;

    let node = state
        .fs
        .upload(claims.sub, &parent_path, &name, &content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(NodeResponse::from(node))),
    ))
}

/// GET /api/files/:id/download - Download a file's content.
pub async fn download(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let (node, content) = state.fs.download(claims.sub, &id).await?;

    let content_type = node
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let encoded_name = urlencoding::encode(&node.name).into_owned();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename*=UTF-8''{encoded_name}"),
        )
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build download response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// PUT /api/files/:id/content - Replace a file's content.
pub async fn overwrite(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let node = state.fs.overwrite(claims.sub, &id, &body).await?;
    Ok(Json(ApiResponse::new(NodeResponse::from(node))))
}

/// PATCH /api/files/:id - Rename a node.
pub async fn rename(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let node = state.fs.rename(claims.sub, &id, &req.new_name).await?;
    Ok(Json(ApiResponse::new(NodeResponse::from(node))))
}

/// DELETE /api/files/:id - Soft-delete a node.
pub async fn delete_node(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.fs.delete(claims.sub, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
