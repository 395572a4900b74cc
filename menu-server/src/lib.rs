//! QR Menu Server - 餐厅数字菜单数据服务
//!
//! # 架构概述
//!
//! - **菜单数据层** (`menu`): 空库检测、静态演示数据回退、快照缓存、CRUD
//! - **数据库** (`db`): 文档存储抽象, 嵌入式 SurrealDB 与内存实现
//! - **认证** (`auth`): 单一管理员密码 + 会话 Cookie
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! menu-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── auth/          # 会话 Cookie、管理员中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── menu/          # 菜单数据层
//! ├── db/            # 文档存储
//! └── utils/         # 错误、日志、校验、slug、时钟
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod menu;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_router};
pub use menu::{MenuError, MenuService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ____  ____     __  ___
  / __ \/ __ \   /  |/  /__  ____  __  __
 / / / / /_/ /  / /|_/ / _ \/ __ \/ / / /
/ /_/ / _, _/  / /  / /  __/ / / / /_/ /
\___\_\_/ |_|  /_/  /_/\___/_/ /_/\__,_/
    "#
    );
}
