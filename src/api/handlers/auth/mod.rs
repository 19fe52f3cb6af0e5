//! Admin authentication endpoints.
//!
//! - `POST /api/admin/login` checks the password and, when enrolled, the
//!   one-time code, then sets the session cookie.
//! - `GET /api/admin/session` reports whether the presented cookie is a
//!   valid session and whether the second factor is enabled.
//! - `POST /api/admin/logout` clears the cookie.
//! - `POST /api/admin/totp` hands out the authenticator provisioning URI,
//!   gated behind the password.

pub mod login;
pub mod session;
pub mod state;
pub mod totp;
pub mod types;
pub(crate) mod utils;

pub use state::AuthState;
