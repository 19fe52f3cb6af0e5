//! Credential checks and session token derivation.

use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use urlencoding::encode;

use crate::otp::{base32, totp};

type HmacSha256 = Hmac<Sha256>;

/// Placeholder password, flagged at startup while still in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "change-this-password";

/// Placeholder token derivation secret, flagged at startup while still in use.
pub const DEFAULT_SERVER_SECRET: &str = "change-this-secret";

/// Issuer label shown by authenticator apps.
pub const DEFAULT_TOTP_ISSUER: &str = "Arisleydis Realtor";

/// Account label shown by authenticator apps.
pub const DEFAULT_TOTP_ACCOUNT: &str = "admin@arisleydisrealtor.com";

/// Session cookie lifetime, 14 days.
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60 * 24 * 14;

/// Runtime configuration for the admin gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    admin_password: SecretString,
    server_secret: SecretString,
    totp_secret: Option<SecretString>,
    totp_issuer: String,
    totp_account: String,
    session_ttl_seconds: i64,
    secure_cookies: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD.to_string()),
            server_secret: SecretString::from(DEFAULT_SERVER_SECRET.to_string()),
            totp_secret: None,
            totp_issuer: DEFAULT_TOTP_ISSUER.to_string(),
            totp_account: DEFAULT_TOTP_ACCOUNT.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure_cookies: false,
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_admin_password(mut self, password: SecretString) -> Self {
        self.admin_password = password;
        self
    }

    #[must_use]
    pub fn with_server_secret(mut self, secret: SecretString) -> Self {
        self.server_secret = secret;
        self
    }

    /// Enable the second factor with a Base32 secret.
    #[must_use]
    pub fn with_totp_secret(mut self, secret: SecretString) -> Self {
        self.totp_secret = Some(secret);
        self
    }

    #[must_use]
    pub fn with_totp_issuer(mut self, issuer: String) -> Self {
        self.totp_issuer = issuer;
        self
    }

    #[must_use]
    pub fn with_totp_account(mut self, account: String) -> Self {
        self.totp_account = account;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    /// Mark session cookies `Secure`. Off by default so local HTTP works.
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// True while the placeholder password or server secret is in use.
    #[must_use]
    pub fn uses_default_credentials(&self) -> bool {
        self.admin_password.expose_secret() == DEFAULT_ADMIN_PASSWORD
            || self.server_secret.expose_secret() == DEFAULT_SERVER_SECRET
    }
}

/// Verdict source for passwords, one-time codes and session cookies.
#[derive(Debug, Clone)]
pub struct Authority {
    config: GateConfig,
}

impl Authority {
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Compare a submitted password against the configured one in constant
    /// time. Lengths must match before the comparison runs.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        let expected = self.config.admin_password.expose_secret().as_bytes();
        let provided = password.as_bytes();

        if expected.len() != provided.len() {
            return false;
        }

        bool::from(expected.ct_eq(provided))
    }

    /// Check a one-time code. Passes when no secret is configured: the
    /// second factor only applies once it has been enrolled.
    #[must_use]
    pub fn verify_totp(&self, code: Option<&str>) -> bool {
        let Some(secret) = self.config.totp_secret.as_ref() else {
            return true;
        };

        let Some(code) = code else {
            return false;
        };

        let Some(key) = base32::decode(secret.expose_secret()) else {
            return false;
        };

        // A secret short enough to decode to zero bytes cannot key the HMAC.
        if key.is_empty() {
            return false;
        }

        totp::verify(&key, code)
    }

    #[must_use]
    pub fn totp_enabled(&self) -> bool {
        self.config.totp_secret.is_some()
    }

    /// Derive the session token for the configured credentials.
    ///
    /// The token is stable for a given password and server secret, so every
    /// login hands out the same value and rotating either input invalidates
    /// all sessions at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the server secret cannot key the token HMAC.
    pub fn session_token(&self) -> Result<String> {
        let mut mac =
            HmacSha256::new_from_slice(self.config.server_secret.expose_secret().as_bytes())
                .context("Failed to key the session token HMAC")?;

        mac.update(self.config.admin_password.expose_secret().as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a presented session cookie value.
    #[must_use]
    pub fn is_session_valid(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };

        let Ok(expected) = self.session_token() else {
            return false;
        };

        if token.len() != expected.len() {
            return false;
        }

        bool::from(token.as_bytes().ct_eq(expected.as_bytes()))
    }

    /// Provisioning URI for authenticator apps, `None` until a secret is
    /// configured.
    ///
    /// The secret travels as-is; issuer and account are percent encoded
    /// both in the label and in the query.
    #[must_use]
    pub fn provisioning_uri(&self) -> Option<String> {
        let secret = self.config.totp_secret.as_ref()?;

        let issuer = encode(&self.config.totp_issuer);
        let account = encode(&self.config.totp_account);

        Some(format!(
            "otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}&algorithm=SHA1&digits=6&period=30",
            secret = secret.expose_secret(),
        ))
    }
}
