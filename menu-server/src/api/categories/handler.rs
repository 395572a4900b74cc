//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{CategoryCreate, CategoryUpdate, MenuCategory};

use crate::core::ServerState;
use crate::utils::validation::{validate_category_create, validate_category_update};
use crate::utils::{AppResponse, AppResult, ok_with_message};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDeleted {
    pub id: String,
    pub deleted_items: usize,
}

/// GET /api/categories - 获取所有分类 (含菜品)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = state.menu.repo().list_categories().await?;
    Ok(Json(categories))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    validate_category_create(&payload)?;
    let category = state.menu.repo().create_category(payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<MenuCategory>> {
    validate_category_update(&payload)?;
    let category = state.menu.repo().update_category(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类及其全部菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<CategoryDeleted>>> {
    let deleted_items = state.menu.repo().delete_category(&id).await?;
    Ok(ok_with_message(
        CategoryDeleted { id, deleted_items },
        "Category deleted",
    ))
}
