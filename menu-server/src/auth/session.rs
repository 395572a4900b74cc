//! Session cookie helpers

use http::HeaderMap;
use http::header::COOKIE;

pub const SESSION_COOKIE: &str = "admin-session";
pub const SESSION_VALUE: &str = "authenticated";

/// 24 hours
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Whether any `Cookie` header carries `admin-session=authenticated`
pub fn has_admin_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name.trim() == SESSION_COOKIE && value.trim() == SESSION_VALUE)
}

/// `Set-Cookie` value issued on login
pub fn session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={SESSION_VALUE}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_MAX_AGE_SECS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session
pub fn cleared_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
