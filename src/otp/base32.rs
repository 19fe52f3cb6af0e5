//! Base32 decoding for authenticator secrets.

/// Decode a Base32 secret the way authenticator apps accept them:
/// case-insensitive, with padding and separators ignored.
///
/// Returns `None` when the input carries no Base32 symbols at all, so a
/// missing or garbage secret reads as "not configured" rather than as an
/// empty key.
#[must_use]
pub fn decode(input: &str) -> Option<Vec<u8>> {
    let mut decoded = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    let mut seen_symbol = false;

    for symbol in input.bytes() {
        let Some(value) = symbol_value(symbol) else {
            continue;
        };

        seen_symbol = true;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            decoded.push(((buffer >> bits) & 0xFF) as u8);
        }
    }

    // Trailing bits that do not fill a byte stand in for padding and are
    // dropped.
    seen_symbol.then_some(decoded)
}

fn symbol_value(symbol: u8) -> Option<u8> {
    match symbol.to_ascii_uppercase() {
        symbol @ b'A'..=b'Z' => Some(symbol - b'A'),
        symbol @ b'2'..=b'7' => Some(symbol - b'2' + 26),
        _ => None,
    }
}
