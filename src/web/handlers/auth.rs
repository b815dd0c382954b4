//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::db::{NewRefreshToken, NewUser, RefreshTokenRepository, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, LogoutRequest, MeResponse, RefreshRequest,
    RefreshResponse, RegisterRequest, UserInfo,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

fn refresh_expiry_string(days: u64) -> String {
    let expires_at = chrono::Utc::now() + chrono::Duration::days(days as i64);
    expires_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

async fn store_refresh_token(
    state: &AppState,
    user_id: i64,
    token: &str,
) -> Result<(), ApiError> {
    let repo = RefreshTokenRepository::new(state.db.pool());
    repo.create(&NewRefreshToken {
        user_id,
        token: token.to_string(),
        expires_at: refresh_expiry_string(state.refresh_token_expiry),
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to store refresh token: {}", e);
        ApiError::internal("Failed to create session")
    })?;
    Ok(())
}

/// POST /api/auth/register - User registration.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate().map_err(ApiError::from_validation_errors)?;

    crate::auth::validate_password(&req.password)
        .map_err(|e| ApiError::bad_request(format!("Password error: {}", e)))?;

    let password_hash = crate::auth::hash_password(&req.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    let repo = UserRepository::new(state.db.pool());
    let mut new_user = NewUser::new(&req.username, password_hash, &req.nickname);
    if let Some(ref email) = req.email {
        new_user = new_user.with_email(email);
    }
    let user = repo.create(&new_user).await?;

    let access_token = state.generate_access_token(user.id, &user.username)?;
    let refresh_token = state.generate_refresh_token();
    store_refresh_token(&state, user.id, &refresh_token).await?;

    Ok(Json(ApiResponse::new(LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        user: UserInfo {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
        },
    })))
}

/// POST /api/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_username(&req.username)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    crate::auth::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid username or password"))?;

    if !user.is_active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    let access_token = state.generate_access_token(user.id, &user.username)?;
    let refresh_token = state.generate_refresh_token();
    store_refresh_token(&state, user.id, &refresh_token).await?;

    let _ = repo.update_last_login(user.id).await;

    Ok(Json(ApiResponse::new(LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        user: UserInfo {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
        },
    })))
}

/// POST /api/auth/refresh - Refresh access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let tokens = RefreshTokenRepository::new(state.db.pool());
    let token = tokens
        .get_valid_token(&req.refresh_token)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let users = UserRepository::new(state.db.pool());
    let user = users
        .get_by_id(token.user_id)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    if !user.is_active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    // Rotate: revoke the old token, issue a new pair
    let _ = tokens.revoke(&req.refresh_token).await;

    let access_token = state.generate_access_token(user.id, &user.username)?;
    let new_refresh_token = state.generate_refresh_token();
    store_refresh_token(&state, user.id, &new_refresh_token).await?;

    Ok(Json(ApiResponse::new(RefreshResponse {
        access_token,
        refresh_token: new_refresh_token,
        expires_in: state.access_token_expiry,
    })))
}

/// POST /api/auth/logout - User logout.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = RefreshTokenRepository::new(state.db.pool());
    let _ = repo.revoke(&req.refresh_token).await;

    Ok(Json(ApiResponse::new(())))
}

/// GET /api/auth/me - Get current user info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(claims.sub)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(MeResponse {
        id: user.id,
        username: user.username,
        nickname: user.nickname,
        email: user.email,
        created_at: user.created_at,
        last_login_at: user.last_login,
    })))
}

/// GET /api/auth/users - List active users (share target lookup).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<UserInfo>>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let users = repo.list_active().await?;

    let infos = users
        .into_iter()
        .map(|u| UserInfo {
            id: u.id,
            username: u.username,
            nickname: u.nickname,
        })
        .collect();

    Ok(Json(ApiResponse::new(infos)))
}
