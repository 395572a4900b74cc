//! Menu item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{ItemCreate, ItemUpdate, MenuItem};

use crate::core::ServerState;
use crate::utils::validation::{validate_item_create, validate_item_update};
use crate::utils::{AppResponse, AppResult, ok_with_message};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDeleted {
    pub category_id: String,
    pub id: String,
}

/// GET /api/categories/:id/items - 分类下的菜品
pub async fn list(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu.repo().list_items(&category_id).await?;
    Ok(Json(items))
}

/// POST /api/categories/:id/items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_item_create(&payload)?;
    let item = state.menu.repo().create_item(&category_id, payload).await?;
    Ok(Json(item))
}

/// PUT /api/categories/:id/items/:item_id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path((category_id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_item_update(&payload)?;
    let item = state
        .menu
        .repo()
        .update_item(&category_id, &item_id, payload)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/categories/:id/items/:item_id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path((category_id, item_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<ItemDeleted>>> {
    state.menu.repo().delete_item(&category_id, &item_id).await?;
    Ok(ok_with_message(
        ItemDeleted {
            category_id,
            id: item_id,
        },
        "Item deleted",
    ))
}
