//! Shared state for the admin auth endpoints.

use crate::gate::{Authority, LoginRateLimiter};

pub struct AuthState {
    authority: Authority,
    rate_limiter: LoginRateLimiter,
}

impl AuthState {
    #[must_use]
    pub fn new(authority: Authority, rate_limiter: LoginRateLimiter) -> Self {
        Self {
            authority,
            rate_limiter,
        }
    }

    #[must_use]
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub(crate) fn rate_limiter(&self) -> &LoginRateLimiter {
        &self.rate_limiter
    }
}
