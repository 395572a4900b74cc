//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - HTTP 层错误类型
//! - [`slug`] - 名称 → 文档 ID
//! - [`clock`] - 可注入时钟 (缓存 TTL)
//! - 日志、输入校验

pub mod clock;
pub mod error;
pub mod logger;
pub mod result;
pub mod slug;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AppError, AppResponse, ok_with_message};
pub use result::AppResult;
pub use slug::slugify;
