use crate::cli::actions::Action;
use crate::gate::GateConfig;
use anyhow::Result;
use secrecy::SecretString;

/// Map parsed arguments to an action.
///
/// # Errors
///
/// Does not fail today; the signature leaves room for required arguments.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let mut config = GateConfig::new()
        .with_admin_password(SecretString::from(string_arg(
            matches,
            "admin-password",
            crate::gate::authority::DEFAULT_ADMIN_PASSWORD,
        )))
        .with_server_secret(SecretString::from(string_arg(
            matches,
            "server-secret",
            crate::gate::authority::DEFAULT_SERVER_SECRET,
        )))
        .with_session_ttl_seconds(
            matches
                .get_one::<i64>("session-ttl-seconds")
                .copied()
                .unwrap_or(crate::gate::authority::DEFAULT_SESSION_TTL_SECONDS),
        )
        .with_secure_cookies(matches.get_flag("secure-cookies"));

    // Labels fall back to their defaults when blank, the secret only
    // enables the second factor when it carries something.
    if let Some(issuer) = non_empty_arg(matches, "totp-issuer") {
        config = config.with_totp_issuer(issuer);
    }

    if let Some(account) = non_empty_arg(matches, "totp-account") {
        config = config.with_totp_account(account);
    }

    if let Some(secret) = non_empty_arg(matches, "totp-secret") {
        config = config.with_totp_secret(SecretString::from(secret));
    }

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        config,
    })
}

fn string_arg(matches: &clap::ArgMatches, name: &str, default: &str) -> String {
    matches
        .get_one::<String>(name)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn non_empty_arg(matches: &clap::ArgMatches, name: &str) -> Option<String> {
    matches
        .get_one::<String>(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_defaults() {
        let matches = commands::new().get_matches_from(vec!["portero"]);
        let action = handler(&matches).unwrap();

        let Action::Server { port, config } = action;
        assert_eq!(port, 8080);
        assert_eq!(config.session_ttl_seconds(), 1_209_600);
        assert!(!config.secure_cookies());
        assert!(config.uses_default_credentials());
    }

    #[test]
    fn test_handler_overrides() {
        let matches = commands::new().get_matches_from(vec![
            "portero",
            "--port",
            "3000",
            "--admin-password",
            "hunter2",
            "--server-secret",
            "pepper",
            "--totp-secret",
            "JBSWY3DPEHPK3PXP",
            "--secure-cookies",
        ]);
        let action = handler(&matches).unwrap();

        let Action::Server { port, config } = action;
        assert_eq!(port, 3000);
        assert!(config.secure_cookies());
        assert!(!config.uses_default_credentials());

        let authority = crate::gate::Authority::new(config);
        assert!(authority.verify_password("hunter2"));
        assert!(authority.totp_enabled());
    }

    #[test]
    fn test_handler_blank_totp_secret_disables() {
        let matches =
            commands::new().get_matches_from(vec!["portero", "--totp-secret", "   "]);
        let action = handler(&matches).unwrap();

        let Action::Server { config, .. } = action;
        let authority = crate::gate::Authority::new(config);
        assert!(!authority.totp_enabled());
    }

    #[test]
    fn test_handler_blank_issuer_falls_back() {
        let matches = commands::new().get_matches_from(vec![
            "portero",
            "--totp-secret",
            "JBSWY3DPEHPK3PXP",
            "--totp-issuer",
            "  ",
        ]);
        let action = handler(&matches).unwrap();

        let Action::Server { config, .. } = action;
        let authority = crate::gate::Authority::new(config);
        let uri = authority.provisioning_uri().unwrap();
        assert!(uri.contains("issuer=Arisleydis%20Realtor"));
    }

    #[test]
    fn test_handler_keeps_secret_material() {
        let matches =
            commands::new().get_matches_from(vec!["portero", "--server-secret", "pepper"]);
        let Action::Server { config, .. } = handler(&matches).unwrap();

        // Secrets stay readable through the expose path only.
        let authority = crate::gate::Authority::new(config.clone());
        let token = authority.session_token().unwrap();
        assert_eq!(token.len(), 64);
        assert!(
            !format!("{config:?}").contains("pepper"),
            "secret material must not leak through Debug"
        );
    }
}
