//! Base64 encoding for embedding binary payloads in text.
//!
//! Encode only. [`encode`] uses the standard alphabet with `=` padding,
//! [`encode_url`] the URL-safe alphabet without padding.

use alloc::string::String;

const STANDARD: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Encodes `bytes` with the standard alphabet, padded to a multiple of four
/// characters.
///
/// ```rust
/// assert_eq!(utf8modem::base64::encode(b"aa"), "YWE=");
/// ```
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    encode_with(bytes, STANDARD, true)
}

/// Encodes `bytes` with the URL-safe alphabet (`-` and `_`), unpadded.
#[must_use]
pub fn encode_url(bytes: &[u8]) -> String {
    encode_with(bytes, URL_SAFE, false)
}

/// Encodes `bytes[base..bound]` with [`encode`], clamping the range.
///
/// A `bound` that is `None`, zero or past the end selects the end of
/// `bytes`. A range that ends up empty or inverted encodes to `""`.
#[must_use]
pub fn encode_range(bytes: &[u8], base: usize, bound: Option<usize>) -> String {
    let bound = match bound {
        Some(bound) if bound != 0 && bound <= bytes.len() => bound,
        _ => bytes.len(),
    };
    bytes.get(base..bound).map(encode).unwrap_or_default()
}

/// Length of the encoding of `n` bytes.
#[must_use]
pub const fn encoded_len(n: usize, padded: bool) -> usize {
    if padded {
        4 * n.div_ceil(3)
    } else {
        (4 * n).div_ceil(3)
    }
}

fn encode_with(bytes: &[u8], alphabet: &[u8; 64], pad: bool) -> String {
    let digit = |index: u32| char::from(alphabet[(index & 0x3F) as usize]);

    let mut out = String::with_capacity(encoded_len(bytes.len(), pad));
    let mut groups = bytes.chunks_exact(3);
    for group in &mut groups {
        let n = u32::from(group[0]) << 16 | u32::from(group[1]) << 8 | u32::from(group[2]);
        out.extend([digit(n >> 18), digit(n >> 12), digit(n >> 6), digit(n)]);
    }
    match *groups.remainder() {
        [a] => {
            let n = u32::from(a) << 16;
            out.extend([digit(n >> 18), digit(n >> 12)]);
            if pad {
                out.push_str("==");
            }
        }
        [a, b] => {
            let n = u32::from(a) << 16 | u32::from(b) << 8;
            out.extend([digit(n >> 18), digit(n >> 12), digit(n >> 6)]);
            if pad {
                out.push('=');
            }
        }
        _ => {}
    }
    out
}
