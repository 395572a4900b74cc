//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use http::header::CACHE_CONTROL;
use serde::Deserialize;
use shared::models::RestaurantInfo;

use crate::core::ServerState;
use crate::utils::validation::validate_info;
use crate::utils::{AppResponse, AppResult, ok_with_message};

const NO_STORE: &str = "no-store, no-cache, must-revalidate";

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotQuery {
    #[serde(default)]
    pub public: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct InfoPayload {
    pub info: RestaurantInfo,
}

/// GET /api/restaurant - 完整数据 (需登录)
/// GET /api/restaurant?public=true - 公开菜单 (不含密码, 不缓存)
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<SnapshotQuery>,
) -> AppResult<Response> {
    if query.public.unwrap_or(false) {
        let snapshot = state.menu.get_public_snapshot().await?;
        return Ok(([(CACHE_CONTROL, NO_STORE)], Json(snapshot)).into_response());
    }

    let snapshot = state.menu.get_full_snapshot().await?;
    Ok(Json(snapshot.as_ref().clone()).into_response())
}

/// PUT /api/restaurant - 更新餐厅信息
pub async fn update_info(
    State(state): State<ServerState>,
    Json(payload): Json<InfoPayload>,
) -> AppResult<Json<AppResponse<RestaurantInfo>>> {
    validate_info(&payload.info)?;
    state.menu.repo().update_info(payload.info.clone()).await?;
    Ok(ok_with_message(payload.info, "Restaurant info updated"))
}
