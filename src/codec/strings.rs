//! Fixed-length text fields.
//!
//! Names and annotation text are stored as NUL-terminated single-byte strings.
//! Bytes map one-to-one onto the first 256 code points, so text read from a
//! file always encodes back to the same bytes.

pub fn decode_fixed_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Characters outside the single-byte range are written as `?`.
pub fn encode_fixed_string(s: &str, len: usize) -> Vec<u8> {
    let mut out: Vec<u8> = s
        .chars()
        .take(len)
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    out.resize(len, 0);
    out
}
