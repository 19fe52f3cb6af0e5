//! OpenAPI document for the admin gate.

use utoipa::OpenApi;

use super::handlers::{auth, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "portero",
        description = "Admin authentication gate: TOTP, sessions and login rate limiting",
    ),
    paths(
        health::health,
        auth::login::login,
        auth::session::session,
        auth::session::logout,
        auth::totp::totp_setup,
    ),
    components(schemas(
        health::Health,
        auth::types::LoginRequest,
        auth::types::OkResponse,
        auth::types::SessionStatusResponse,
        auth::types::TotpSetupRequest,
        auth::types::TotpSetupResponse,
        auth::types::ErrorResponse,
    )),
    tags(
        (name = "admin", description = "Admin panel authentication"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "portero");

        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/api/admin/login"));
        assert!(paths.contains_key("/api/admin/logout"));
        assert!(paths.contains_key("/api/admin/session"));
        assert!(paths.contains_key("/api/admin/totp"));
    }
}
