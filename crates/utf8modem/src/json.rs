//! JSON string body encoding.
//!
//! [`encode_json`] writes the bytes that go between the quotes of a JSON
//! string literal. It is [`encode_utf8`](crate::encode_utf8) plus escaping:
//!
//! - `"` and `\` become `\"` and `\\`;
//! - backspace, tab, newline, form feed and carriage return become `\b`, `\t`,
//!   `\n`, `\f` and `\r`;
//! - every other control code below 0x20 becomes `\u00XX`;
//! - a surrogate that is not half of a valid pair becomes a `\uXXXX` escape
//!   of its own value, so a JSON parser reconstructs the same 16-bit text.
//!
//! Hex digits are lowercase, which matches `serde_json` and `JSON.stringify`.
#![allow(clippy::cast_possible_truncation)]

use alloc::vec::Vec;

use crate::{
    CodecError,
    utf8::{
        append_with, check_capacity, is_surrogate, put_supplementary, put_unit, surrogate_pair_at,
    },
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Short escape letter for each control code, or 0 where `\u00XX` is used.
const CONTROL_ESCAPES: [u8; 0x20] = {
    let mut table = [0u8; 0x20];
    table[0x08] = b'b';
    table[0x09] = b't';
    table[0x0A] = b'n';
    table[0x0C] = b'f';
    table[0x0D] = b'r';
    table
};

#[inline]
fn put_escape(letter: u8, target: &mut [u8], offset: usize) -> usize {
    target[offset] = b'\\';
    target[offset + 1] = letter;
    offset + 2
}

#[inline]
fn put_unicode_escape(code: u16, target: &mut [u8], offset: usize) -> usize {
    target[offset] = b'\\';
    target[offset + 1] = b'u';
    for (slot, shift) in target[offset + 2..offset + 6].iter_mut().zip([12, 8, 4, 0]) {
        *slot = HEX_DIGITS[usize::from((code >> shift) & 0xF)];
    }
    offset + 6
}

/// Encodes `text` as the body of a JSON string into `target` at `offset`,
/// returning the offset after the last byte written. Quotes are not added.
///
/// # Panics
///
/// Panics if `target` is too small; [`json_byte_length`] bytes past `offset`
/// are always enough.
///
/// ```rust
/// let text: Vec<u16> = "a\"\n\u{1}".encode_utf16().collect();
/// let mut out = Vec::new();
/// utf8modem::encode_json_to_vec(&text, &mut out);
/// assert_eq!(out, br#"a\"\n\u0001"#);
/// ```
pub fn encode_json(text: &[u16], target: &mut [u8], mut offset: usize) -> usize {
    let mut i = 0;
    while i < text.len() {
        let code = text[i];
        match code {
            0x00..=0x1F => {
                offset = match CONTROL_ESCAPES[usize::from(code)] {
                    0 => put_unicode_escape(code, target, offset),
                    letter => put_escape(letter, target, offset),
                };
            }
            0x22 | 0x5C => offset = put_escape(code as u8, target, offset),
            0x20..=0x7F => {
                target[offset] = code as u8;
                offset += 1;
            }
            _ if is_surrogate(code) => {
                if let Some(codepoint) = surrogate_pair_at(text, i) {
                    offset = put_supplementary(codepoint, target, offset);
                    i += 1;
                } else {
                    offset = put_unicode_escape(code, target, offset);
                }
            }
            _ => offset = put_unit(code, target, offset),
        }
        i += 1;
    }
    offset
}

/// Upper bound on the bytes [`encode_json`] writes for `text`.
///
/// Like [`byte_length`](crate::byte_length) each unit is costed on its own;
/// surrogates are costed as the 6-byte escape a lone one needs.
#[must_use]
pub fn json_byte_length(text: &[u16]) -> usize {
    text.iter()
        .map(|&code| match code {
            0x00..=0x1F => 6,
            0x22 | 0x5C => 2,
            0x20..=0x7F => 1,
            0x80..=0x7FF => 2,
            0xD800..=0xDFFF => 6,
            _ => 3,
        })
        .sum()
}

/// Checked [`encode_json`].
///
/// # Errors
///
/// Returns [`CodecError::InsufficientCapacity`] when [`json_byte_length`]
/// bytes do not fit after `offset`. Nothing is written in that case.
pub fn try_encode_json(
    text: &[u16],
    target: &mut [u8],
    offset: usize,
) -> Result<usize, CodecError> {
    check_capacity(json_byte_length(text), target.len(), offset)?;
    Ok(encode_json(text, target, offset))
}

/// Appends the JSON string body of `text` to `out`, returning the number of
/// bytes appended.
pub fn encode_json_to_vec(text: &[u16], out: &mut Vec<u8>) -> usize {
    append_with(out, json_byte_length(text), |target, offset| {
        encode_json(text, target, offset)
    })
}
