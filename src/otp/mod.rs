pub mod base32;
pub mod hotp;
pub mod totp;
