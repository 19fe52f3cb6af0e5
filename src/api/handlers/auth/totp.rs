//! Second factor enrollment: hands out the provisioning URI.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::warn;

use super::{
    login::{invalid_body_response, lockout_response},
    state::AuthState,
    types::{ErrorResponse, TotpSetupRequest, TotpSetupResponse},
    utils::client_identifier,
};
use crate::gate::rate_limit::{FailureOutcome, LimiterDecision};

/// Password-gated so a stolen session cookie alone cannot read the
/// enrollment secret. Failures count against the same lockout as login.
#[utoipa::path(
    post,
    path = "/api/admin/totp",
    request_body = TotpSetupRequest,
    responses(
        (status = 200, description = "Provisioning URI for authenticator apps", body = TotpSetupResponse),
        (status = 400, description = "Malformed body, or the second factor is not configured", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 429, description = "Locked out after repeated failures", body = ErrorResponse),
    ),
    tag = "admin"
)]
pub async fn totp_setup(
    headers: HeaderMap,
    Extension(auth_state): Extension<Arc<AuthState>>,
    payload: Option<Json<TotpSetupRequest>>,
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

    let password_ok = auth_state
        .authority()
        .verify_password(request.password.as_deref().unwrap_or_default());

    if !password_ok {
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
                    error: "Invalid password.".to_string(),
                }),
            )
                .into_response(),
        };
    }

    let Some(uri) = auth_state.authority().provisioning_uri() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "2FA is not enabled on this environment.".to_string(),
            }),
        )
            .into_response();
    };

    (StatusCode::OK, Json(TotpSetupResponse { uri })).into_response()
}
