//! Admin API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/admin/login | POST | 无 |
//! | /api/admin/logout | POST | 无 |
//! | /api/admin/password | PUT | 需要 |
//! | /api/admin/import | POST | 需要 |
//! | /api/admin/reset | POST | 需要 |

mod handler;

use axum::{
    Router,
    routing::{post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/password", put(handler::change_password))
        .route("/import", post(handler::import))
        .route("/reset", post(handler::reset))
}
