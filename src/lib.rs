//! # Portero (Admin Authentication Gate)
//!
//! `portero` is the authentication backend for the Arisleydis Realtor admin
//! panel. The public site and the property CRUD are separate collaborators;
//! this service owns only the security-bearing decisions: is the password
//! right, is the one-time code right, is this session cookie valid, and has
//! this client failed too often.
//!
//! ## One-time codes
//!
//! The second factor is standard `TOTP` (RFC 6238 over RFC 4226 `HOTP`),
//! implemented from primitives so the accepted codes stay byte-compatible
//! with ordinary authenticator apps: Base32 secret, HMAC-SHA1, 6 digits,
//! 30-second steps, one step of clock-drift tolerance either way. The secret
//! is deployment configuration; when it is absent the second factor is
//! disabled and password-only login is accepted.
//!
//! ## Sessions
//!
//! The session token is a deterministic HMAC-SHA256 of the admin password
//! keyed by a separate server secret. There is no session store: validating
//! a cookie means recomputing the digest. Logout therefore clears the cookie
//! without revoking the token; rotating either secret invalidates every
//! session at once.
//!
//! ## Lockout
//!
//! Login failures are counted per client identifier in a sliding 15-minute
//! window; the fifth failure locks the identifier out for 15 minutes. The
//! table lives in process memory and is owned by a single limiter component,
//! so it neither survives restarts nor shards across instances.

pub mod api;
pub mod cli;
pub mod gate;
pub mod otp;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
