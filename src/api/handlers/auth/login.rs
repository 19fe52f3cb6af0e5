//! Admin login endpoint.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{
    session::session_cookie,
    state::AuthState,
    types::{ErrorResponse, LoginRequest, OkResponse},
    utils::client_identifier,
};
use crate::gate::rate_limit::{FailureOutcome, LimiterDecision};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, session cookie set", body = OkResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Locked out after repeated failures", body = ErrorResponse),
    ),
    tag = "admin"
)]
pub async fn login(
    headers: HeaderMap,
    Extension(auth_state): Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let identifier = client_identifier(&headers);

    if let LimiterDecision::Locked {
        retry_after_seconds,
    } = auth_state.rate_limiter().check_allowed(&identifier).await
    {
        return lockout_response(retry_after_seconds);
    }

    let Some(Json(request)) = payload else {
        return invalid_body_response();
    };

    // Both verdicts are always computed; a wrong password does not skip
    // the code check.
    let password_ok = auth_state
        .authority()
        .verify_password(request.password.as_deref().unwrap_or_default());
    let totp_ok = auth_state.authority().verify_totp(request.code.as_deref());

    if !password_ok || !totp_ok {
        return match auth_state.rate_limiter().register_failure(&identifier).await {
            FailureOutcome::LockedOut {
                retry_after_seconds,
            } => {
                warn!("Login lockout for {}", identifier);

                lockout_response(retry_after_seconds)
            }

            FailureOutcome::Counted => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid credentials.".to_string(),
                }),
            )
                .into_response(),
        };
    }

    auth_state.rate_limiter().clear_failures(&identifier).await;

    let token = match auth_state.authority().session_token() {
        Ok(token) => token,

        Err(err) => {
            error!("Failed to derive session token: {}", err);

            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response_headers = HeaderMap::new();

    match session_cookie(auth_state.authority().config(), &token) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }

        Err(err) => {
            error!("Failed to build session cookie: {}", err);

            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    info!("Admin login accepted");

    (
        StatusCode::OK,
        response_headers,
        Json(OkResponse { ok: true }),
    )
        .into_response()
}

pub(super) fn lockout_response(retry_after_seconds: u64) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse {
            error: format!("Too many failed attempts. Try again in {retry_after_seconds} seconds."),
        }),
    )
        .into_response()
}

pub(super) fn invalid_body_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid JSON body.".to_string(),
        }),
    )
        .into_response()
}
