//! 管理员会话
//!
//! 单一共享密钥登录，登录成功后下发 `admin-session` Cookie。

pub mod middleware;
pub mod session;

pub use middleware::require_admin;
pub use session::{SESSION_COOKIE, SESSION_VALUE, cleared_cookie, has_admin_session, session_cookie};
