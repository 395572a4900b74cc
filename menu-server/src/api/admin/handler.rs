//! Admin API Handlers

use axum::{Json, extract::State, response::IntoResponse};
use http::header::SET_COOKIE;
use serde::{Deserialize, Serialize};
use shared::models::RestaurantData;

use crate::auth::{cleared_cookie, session_cookie};
use crate::core::ServerState;
use crate::menu::{DatasetCounts, MenuError};
use crate::security_log;
use crate::utils::validation::{validate_import, validate_new_password};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// POST /api/admin/login - 校验密码并下发会话 Cookie
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    match state.menu.login(&req.password).await {
        Ok(()) => {}
        Err(MenuError::InvalidCredential) => {
            security_log!("WARN", "login_failed", reason = "invalid_password");
            return Err(AppError::InvalidCredential);
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!("Admin logged in");
    Ok((
        [(SET_COOKIE, session_cookie(state.secure_cookies()))],
        ok_with_message(SessionResponse { success: true }, "Logged in"),
    ))
}

/// POST /api/admin/logout - 清除会话 Cookie
pub async fn logout(State(state): State<ServerState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_cookie(state.secure_cookies()))],
        ok_with_message(SessionResponse { success: true }, "Logged out"),
    )
}

/// PUT /api/admin/password - 修改管理员密码
pub async fn change_password(
    State(state): State<ServerState>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<AppResponse<SessionResponse>>> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::validation(
            "currentPassword and newPassword are required",
        ));
    }
    validate_new_password(&req.new_password)?;

    match state
        .menu
        .change_password(&req.current_password, &req.new_password)
        .await
    {
        Ok(()) => {}
        Err(MenuError::InvalidCredential) => {
            security_log!("WARN", "password_change_failed", reason = "invalid_current_password");
            return Err(AppError::InvalidCredential);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(ok_with_message(
        SessionResponse { success: true },
        "Password changed",
    ))
}

/// POST /api/admin/import - 导入完整数据集
pub async fn import(
    State(state): State<ServerState>,
    Json(data): Json<RestaurantData>,
) -> AppResult<Json<AppResponse<DatasetCounts>>> {
    validate_import(&data)?;
    let counts = state.menu.migrate_from_json(data).await?;
    Ok(ok_with_message(counts, "Data imported"))
}

/// POST /api/admin/reset - 清空数据库 (恢复静态演示数据)
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<AppResponse<DatasetCounts>>> {
    let counts = state.menu.clear_database().await?;
    Ok(ok_with_message(counts, "Database cleared"))
}
