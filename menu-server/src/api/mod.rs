//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`restaurant`] - 餐厅信息与菜单快照
//! - [`admin`] - 登录、密码、导入、重置
//! - [`categories`] - 分类管理
//! - [`items`] - 菜品管理

pub mod admin;
pub mod categories;
pub mod health;
pub mod items;
pub mod restaurant;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the Axum router (without state)
pub fn router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(restaurant::router())
        .merge(admin::router())
        .merge(categories::router())
        .merge(items::router())
}
