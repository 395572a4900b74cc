//! 认证中间件

use axum::{extract::Request, middleware::Next, response::Response};

use crate::AppError;
use crate::auth::has_admin_session;
use crate::security_log;

/// 管理员中间件 - 要求有效的 `admin-session` Cookie
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/admin/login`, `/api/admin/logout`
/// - `GET /api/restaurant?public=true` (公开菜单)
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route = path == "/api/admin/login"
        || path == "/api/admin/logout"
        || (req.method() == http::Method::GET && path == "/api/restaurant" && is_public_query(req.uri().query()));
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    if !has_admin_session(req.headers()) {
        security_log!("WARN", "admin_session_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}

fn is_public_query(query: Option<&str>) -> bool {
    query
        .unwrap_or_default()
        .split('&')
        .any(|pair| pair == "public=true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_flag_must_be_exact() {
        assert!(is_public_query(Some("public=true")));
        assert!(is_public_query(Some("lang=tr&public=true")));
        assert!(!is_public_query(Some("public=1")));
        assert!(!is_public_query(None));
    }
}
