//! Admin gate: credential verdicts and login rate limiting.

pub mod authority;
pub mod rate_limit;

pub use authority::{Authority, GateConfig};
pub use rate_limit::LoginRateLimiter;
