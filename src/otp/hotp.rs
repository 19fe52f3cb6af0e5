//! HOTP (RFC 4226) code generation.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

type HmacSha1 = Hmac<Sha1>;

/// Code length used for authenticator app codes.
pub const DIGITS: u32 = 6;

#[derive(Error, Debug)]
pub enum HotpError {
    #[error("invalid HMAC key: {0}")]
    InvalidKey(#[from] hmac::digest::InvalidLength),
}

/// Generate the code for a counter value, zero padded to `digits`.
///
/// # Errors
///
/// Returns an error if the secret cannot be used as an HMAC key.
pub fn generate(secret: &[u8], counter: u64, digits: u32) -> Result<String, HotpError> {
    let mut mac = HmacSha1::new_from_slice(secret)?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation, RFC 4226 section 5.3: the low four bits of the
    // last byte pick the four byte window, the top bit of the window is
    // masked off.
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    let code = binary % 10u32.pow(digits);

    Ok(format!("{code:0width$}", width = digits as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Appendix D of RFC 4226, secret "12345678901234567890".
    const RFC4226_SECRET: &[u8] = b"12345678901234567890";
    const RFC4226_CODES: [&str; 10] = [
        "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583", "399871",
        "520489",
    ];

    #[test]
    fn test_generate_rfc4226_vectors() {
        for (counter, expected) in RFC4226_CODES.iter().enumerate() {
            let code = generate(RFC4226_SECRET, counter as u64, DIGITS).unwrap();
            assert_eq!(&code, expected, "counter {counter}");
        }
    }

    #[test]
    fn test_generate_rfc6238_vectors() {
        // Appendix B of RFC 6238, SHA-1 rows: 8 digit codes at the
        // published timestamps with a 30 second step.
        let vectors: [(u64, &str); 6] = [
            (59, "94287082"),
            (1_111_111_109, "07081804"),
            (1_111_111_111, "14050471"),
            (1_234_567_890, "89005924"),
            (2_000_000_000, "69279037"),
            (20_000_000_000, "65353130"),
        ];

        for (time, expected) in vectors {
            let code = generate(RFC4226_SECRET, time / 30, 8).unwrap();
            assert_eq!(&code, expected, "time {time}");
        }
    }

    #[test]
    fn test_generate_is_zero_padded() {
        for counter in 0..10u64 {
            let code = generate(RFC4226_SECRET, counter, DIGITS).unwrap();
            assert_eq!(code.len(), DIGITS as usize);
        }
    }

    #[test]
    fn test_generate_large_counter() {
        // Same code as the authenticator reference secret at that moment.
        let secret = crate::otp::base32::decode("HXDMVJECJJWSRB3HWIZR4IFUGFTMXBOZ").unwrap();
        let code = generate(&secret, 1_478_167_454 / 30, DIGITS).unwrap();
        assert_eq!(code, "488676");
    }

    #[test]
    fn test_generate_empty_secret() {
        // HMAC accepts any key length, including none.
        assert!(generate(&[], 0, DIGITS).is_ok());
    }
}
