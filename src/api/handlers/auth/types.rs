//! Request and response types for the admin auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login payload. Both fields are optional on the wire; a missing
/// password counts as empty and the code is only consulted once the
/// second factor is enabled.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub password: Option<String>,
    pub code: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TotpSetupRequest {
    pub password: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub totp_enabled: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TotpSetupResponse {
    pub uri: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_missing_fields() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.password.is_none());
        assert!(request.code.is_none());

        let request: LoginRequest =
            serde_json::from_str(r#"{"password":"secret","code":"123456"}"#).unwrap();
        assert_eq!(request.password.as_deref(), Some("secret"));
        assert_eq!(request.code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_session_status_uses_camel_case() {
        let status = SessionStatusResponse {
            authenticated: true,
            totp_enabled: false,
        };

        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"authenticated":true,"totpEnabled":false}"#);
    }

    #[test]
    fn test_ok_response_shape() {
        let json = serde_json::to_string(&OkResponse { ok: true }).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "Invalid credentials.".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"Invalid credentials."}"#);
    }
}
