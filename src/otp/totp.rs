//! TOTP (RFC 6238) verification.

use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

use super::hotp;

/// Time step in seconds.
pub const PERIOD: u64 = 30;

/// Verify a submitted code against a decoded secret at the current time.
#[must_use]
pub fn verify(secret: &[u8], code: &str) -> bool {
    verify_at(secret, code, unix_now())
}

/// Verify a submitted code at an explicit unix timestamp.
///
/// The previous, current and next time step are all accepted to absorb
/// clock drift on either side. Non-digits in the submitted code are
/// stripped before the length check, so "123 456" counts as six digits.
#[must_use]
pub fn verify_at(secret: &[u8], code: &str, unix_seconds: u64) -> bool {
    let submitted: String = code.chars().filter(char::is_ascii_digit).collect();

    if submitted.len() != hotp::DIGITS as usize {
        return false;
    }

    let counter = unix_seconds / PERIOD;

    for step in [-1i64, 0, 1] {
        // At counter zero there is no previous step to check.
        let Some(candidate) = counter.checked_add_signed(step) else {
            continue;
        };

        let Ok(expected) = hotp::generate(secret, candidate, hotp::DIGITS) else {
            continue;
        };

        if bool::from(expected.as_bytes().ct_eq(submitted.as_bytes())) {
            return true;
        }
    }

    false
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
