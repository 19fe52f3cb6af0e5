//! Session status, logout and the cookie plumbing both share.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{
    state::AuthState,
    types::{OkResponse, SessionStatusResponse},
};
use crate::gate::GateConfig;

pub(crate) const SESSION_COOKIE_NAME: &str = "aris_admin_session";

#[utoipa::path(
    get,
    path = "/api/admin/session",
    responses(
        (status = 200, description = "Session status for the presented cookie", body = SessionStatusResponse),
    ),
    tag = "admin"
)]
pub async fn session(
    headers: HeaderMap,
    Extension(auth_state): Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let token = extract_session_cookie(&headers);

    let status = SessionStatusResponse {
        authenticated: auth_state.authority().is_session_valid(token.as_deref()),
        totp_enabled: auth_state.authority().totp_enabled(),
    };

    (StatusCode::OK, Json(status))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = OkResponse),
    ),
    tag = "admin"
)]
pub async fn logout() -> impl IntoResponse {
    // The token itself stays valid until the secrets rotate; all logout can
    // do is drop the cookie.
    let mut headers = HeaderMap::new();

    if let Ok(cookie) = clear_session_cookie() {
        headers.insert(SET_COOKIE, cookie);
    }

    (StatusCode::OK, headers, Json(OkResponse { ok: true }))
}

/// Build the login `Set-Cookie` value: `HttpOnly`, `SameSite=Lax`, scoped
/// to the whole site, with `Secure` appended when configured.
pub(super) fn session_cookie(
    config: &GateConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl = config.session_ttl_seconds();
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}={token}; Path=/; Max-Age={ttl}; HttpOnly; SameSite=Lax");

    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}=; Path=/; Max-Age=0"))
}

/// Pull the session cookie value out of the `Cookie` header, if any.
pub(super) fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;

    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');

        let Some(name) = parts.next() else {
            continue;
        };
        let Some(value) = parts.next() else {
            continue;
        };

        if name.trim() == SESSION_COOKIE_NAME {
            return Some(value.trim().to_string());
        }
    }

    None
}
