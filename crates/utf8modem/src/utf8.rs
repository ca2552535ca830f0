//! UTF-8 encoding and decoding of 16-bit text.
//!
//! Encoders write into a caller-sized `&mut [u8]` starting at `offset` and
//! return the offset one past the last byte written. They do not check
//! capacity up front: size the target with [`byte_length`] (or use the
//! `try_*` and `*_to_vec` variants). Writing past the end of the target panics
//! on the slice bound rather than corrupting memory.
//!
//! Decoders never fail. Bytes that cannot start a symbol become U+FFFD.
//!
//! Layouts handled here:
//!
//! ```text
//! 1 byte   0xxxxxxx
//! 2 bytes  110xxxxx 10xxxxxx
//! 3 bytes  1110xxxx 10xxxxxx 10xxxxxx
//! 4 bytes  11110xxx 10xxxxxx 10xxxxxx 10xxxxxx   (surrogate pair in UTF-16)
//! ```
#![allow(clippy::cast_possible_truncation)]

use alloc::vec::Vec;

use crate::{CodecError, Encoding, REPLACEMENT};

/// Payload mask for the lead byte, indexed by symbol width.
const LEAD_MASK: [u8; 5] = [0, 0x7F, 0x1F, 0x0F, 0x07];

const MAX_CODEPOINT: u32 = 0x10_FFFF;

#[inline]
pub(crate) fn is_surrogate(code: u16) -> bool {
    (0xD800..=0xDFFF).contains(&code)
}

#[inline]
fn is_low_surrogate(code: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&code)
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// If `text[i]` starts a valid surrogate pair within `text`, returns the
/// composed codepoint.
#[inline]
pub(crate) fn surrogate_pair_at(text: &[u16], i: usize) -> Option<u32> {
    let high = text[i];
    if !(0xD800..=0xDBFF).contains(&high) {
        return None;
    }
    match text.get(i + 1) {
        Some(&low) if is_low_surrogate(low) => {
            Some(0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00))
        }
        _ => None,
    }
}

/// Writes a BMP code unit as 1, 2 or 3 bytes. Surrogate filtering is the
/// caller's job.
#[inline]
pub(crate) fn put_unit(code: u16, target: &mut [u8], offset: usize) -> usize {
    let code = u32::from(code);
    if code <= 0x7F {
        target[offset] = code as u8;
        offset + 1
    } else if code <= 0x7FF {
        target[offset] = 0xC0 | (code >> 6) as u8;
        target[offset + 1] = 0x80 | (code & 0x3F) as u8;
        offset + 2
    } else {
        target[offset] = 0xE0 | (code >> 12) as u8;
        target[offset + 1] = 0x80 | ((code >> 6) & 0x3F) as u8;
        target[offset + 2] = 0x80 | (code & 0x3F) as u8;
        offset + 3
    }
}

/// Writes a supplementary-plane codepoint as 4 bytes.
#[inline]
pub(crate) fn put_supplementary(codepoint: u32, target: &mut [u8], offset: usize) -> usize {
    target[offset] = 0xF0 | ((codepoint >> 18) & 0x07) as u8;
    target[offset + 1] = 0x80 | ((codepoint >> 12) & 0x3F) as u8;
    target[offset + 2] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
    target[offset + 3] = 0x80 | (codepoint & 0x3F) as u8;
    offset + 4
}

/// Encodes `text` as UTF-8 into `target` starting at `offset`, returning the
/// offset after the last byte written.
///
/// A high surrogate followed (inside `text`) by a low surrogate is written as
/// the 4-byte encoding of the pair. Any other surrogate is written as U+FFFD.
///
/// # Panics
///
/// Panics if `target` is too small. [`byte_length`] bytes past `offset` are
/// always enough.
///
/// ```rust
/// let text: Vec<u16> = "Hello".encode_utf16().collect();
/// let mut buf = [0u8; 5];
/// assert_eq!(utf8modem::encode_utf8(&text, &mut buf, 0), 5);
/// assert_eq!(&buf, b"Hello");
/// ```
pub fn encode_utf8(text: &[u16], target: &mut [u8], mut offset: usize) -> usize {
    let mut i = 0;
    while i < text.len() {
        let code = text[i];
        if code <= 0x7F {
            target[offset] = code as u8;
            offset += 1;
        } else if is_surrogate(code) {
            if let Some(codepoint) = surrogate_pair_at(text, i) {
                offset = put_supplementary(codepoint, target, offset);
                i += 1;
            } else {
                offset = put_unit(REPLACEMENT, target, offset);
            }
        } else {
            offset = put_unit(code, target, offset);
        }
        i += 1;
    }
    offset
}

/// Like [`encode_utf8`], but U+0000 is written as the overlong pair
/// `C0 80` so that the output never contains a NUL byte, and every surrogate,
/// paired or not, is written as U+FFFD (`EF BF BD`).
///
/// # Panics
///
/// Panics if `target` is too small; size it with [`overlong_byte_length`].
pub fn encode_utf8_overlong(text: &[u16], target: &mut [u8], mut offset: usize) -> usize {
    for &code in text {
        if code == 0 {
            target[offset] = 0xC0;
            target[offset + 1] = 0x80;
            offset += 2;
        } else if code <= 0x7F {
            target[offset] = code as u8;
            offset += 1;
        } else if is_surrogate(code) {
            target[offset..offset + 3].copy_from_slice(&[0xEF, 0xBF, 0xBD]);
            offset += 3;
        } else {
            offset = put_unit(code, target, offset);
        }
    }
    offset
}

/// Upper bound on the bytes [`encode_utf8`] writes for `text`.
///
/// Each code unit is costed on its own (1, 2 or 3 bytes by value), so a
/// surrogate pair counts 6 although only 4 are written. The bound is never
/// below the actual output.
#[must_use]
pub fn byte_length(text: &[u16]) -> usize {
    text.iter()
        .map(|&code| match code {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            _ => 3,
        })
        .sum()
}

/// Upper bound on the bytes [`encode_utf8_overlong`] writes for `text`.
#[must_use]
pub fn overlong_byte_length(text: &[u16]) -> usize {
    byte_length(text) + text.iter().filter(|&&code| code == 0).count()
}

/// Checked [`encode_utf8`]: fails instead of panicking when `target` cannot
/// hold [`byte_length`] bytes past `offset`.
///
/// # Errors
///
/// Returns [`CodecError::InsufficientCapacity`] when the worst case does not
/// fit. Nothing is written in that case.
pub fn try_encode_utf8(
    text: &[u16],
    target: &mut [u8],
    offset: usize,
) -> Result<usize, CodecError> {
    check_capacity(byte_length(text), target.len(), offset)?;
    Ok(encode_utf8(text, target, offset))
}

/// Checked [`encode_utf8_overlong`].
///
/// # Errors
///
/// Returns [`CodecError::InsufficientCapacity`] when
/// [`overlong_byte_length`] bytes do not fit after `offset`.
pub fn try_encode_utf8_overlong(
    text: &[u16],
    target: &mut [u8],
    offset: usize,
) -> Result<usize, CodecError> {
    check_capacity(overlong_byte_length(text), target.len(), offset)?;
    Ok(encode_utf8_overlong(text, target, offset))
}

/// Appends the UTF-8 encoding of `text` to `out`, returning the number of
/// bytes appended.
pub fn encode_utf8_to_vec(text: &[u16], out: &mut Vec<u8>) -> usize {
    append_with(out, byte_length(text), |target, offset| encode_utf8(text, target, offset))
}

/// Appends the overlong encoding of `text` to `out`, returning the number of
/// bytes appended.
pub fn encode_utf8_overlong_to_vec(text: &[u16], out: &mut Vec<u8>) -> usize {
    append_with(out, overlong_byte_length(text), |target, offset| {
        encode_utf8_overlong(text, target, offset)
    })
}

pub(crate) fn append_with(
    out: &mut Vec<u8>,
    reserve: usize,
    encode: impl FnOnce(&mut [u8], usize) -> usize,
) -> usize {
    let start = out.len();
    out.resize(start + reserve, 0);
    let end = encode(out.as_mut_slice(), start);
    out.truncate(end);
    end - start
}

pub(crate) fn check_capacity(needed: usize, len: usize, offset: usize) -> Result<(), CodecError> {
    let available = len.saturating_sub(offset);
    if needed > available {
        return Err(CodecError::InsufficientCapacity { needed, available });
    }
    Ok(())
}

/// Number of bytes in the UTF-8 symbol introduced by `lead`: 4 for
/// `11110xxx` and above, 3 for `1110xxxx`, 2 for `110xxxxx`, and 1 for ASCII
/// and stray continuation bytes.
#[inline]
#[must_use]
pub fn utf8_symbol_length(lead: u8) -> usize {
    match lead {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

/// Number of bytes at the end of `buf` that start a multi-byte symbol the
/// buffer does not complete.
///
/// The tail is held only when it is a lead byte in `0xC0..=0xF7` followed by
/// continuation bytes alone, and fewer of them than the lead announces. Any
/// other tail is already decided by [`decode_utf8_lossy`] and held as 0.
#[must_use]
pub fn utf8_fragment_bytes(buf: &[u8]) -> usize {
    let tail = &buf[buf.len().saturating_sub(3)..];
    let Some(at) = tail.iter().rposition(|&b| !is_continuation(b)) else {
        return 0;
    };
    let held = tail.len() - at;
    match tail[at] {
        lead @ 0xC0..=0xF7 if held < utf8_symbol_length(lead) => held,
        _ => 0,
    }
}

/// Number of leading bytes of `buf`, at most `wanted`, that are continuation
/// bytes and can extend a held UTF-8 fragment.
#[must_use]
pub fn utf8_continuation_run(buf: &[u8], wanted: usize) -> usize {
    buf.iter()
        .take(wanted)
        .take_while(|&&b| is_continuation(b))
        .count()
}

/// Number of UTF-16 code units `buf` renders to in `encoding`, without
/// decoding it.
///
/// For UTF-8 every byte that is not a continuation byte counts one unit,
/// except a 4-byte lead (`0xF0..=0xF7`), which counts two. That is the
/// surrogate pair it decodes to, so for valid UTF-8 the count equals the
/// length of the decoded text rather than its codepoint count.
#[must_use]
pub fn string_length(buf: &[u8], encoding: Encoding) -> usize {
    match encoding {
        Encoding::Utf8 => buf
            .iter()
            .map(|&b| match b {
                0x80..=0xBF => 0,
                0xF0..=0xF7 => 2,
                _ => 1,
            })
            .sum(),
        Encoding::Hex => buf.len() * 2,
        Encoding::Base64 => 4 * buf.len().div_ceil(3),
        Encoding::Utf16Le => buf.len() / 2,
        Encoding::Latin1 | Encoding::Ascii => buf.len(),
    }
}

#[inline]
fn push_codepoint(out: &mut Vec<u16>, codepoint: u32) {
    if codepoint < 0x1_0000 {
        out.push(codepoint as u16);
    } else if codepoint <= MAX_CODEPOINT {
        let v = codepoint - 0x1_0000;
        out.push(0xD800 + (v >> 10) as u16);
        out.push(0xDC00 + (v & 0x3FF) as u16);
    } else {
        out.push(REPLACEMENT);
    }
}

/// Decodes UTF-8 `buf` into 16-bit text.
///
/// Decoding is unchecked beyond the lead byte: continuation bytes contribute
/// their low six bits whatever their top bits are. A continuation byte or a
/// byte above `0xF7` in lead position becomes U+FFFD, and a symbol cut short
/// by the end of `buf` becomes a single U+FFFD.
///
/// ```rust
/// assert_eq!(utf8modem::decode_utf8(&[0xE2, 0x82, 0xAC]), [0x20AC]);
/// ```
#[must_use]
pub fn decode_utf8(buf: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(buf.len());
    let mut i = 0;
    while let Some(&lead) = buf.get(i) {
        match lead {
            0x00..=0x7F => {
                out.push(u16::from(lead));
                i += 1;
            }
            0xC0..=0xF7 => {
                let width = utf8_symbol_length(lead);
                let Some(tail) = buf.get(i + 1..i + width) else {
                    out.push(REPLACEMENT);
                    break;
                };
                let codepoint = tail.iter().fold(u32::from(lead & LEAD_MASK[width]), |cp, &b| {
                    (cp << 6) | u32::from(b & 0x3F)
                });
                push_codepoint(&mut out, codepoint);
                i += width;
            }
            _ => {
                out.push(REPLACEMENT);
                i += 1;
            }
        }
    }
    out
}

/// Decodes UTF-8 `buf`, checking continuation bytes.
///
/// Where a continuation byte is expected but an ASCII or lead byte is found,
/// U+FFFD is emitted and that byte starts the next symbol. This is the policy
/// of [`scan_string_z`] without the NUL terminator.
#[must_use]
pub fn decode_utf8_lossy(buf: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(buf.len());
    decode_utf8_lossy_into(buf, &mut out);
    out
}

pub(crate) fn decode_utf8_lossy_into(buf: &[u8], out: &mut Vec<u16>) {
    out.reserve(buf.len());
    decode_checked(buf, 0, false, out);
}

/// Checked decoder shared by [`decode_utf8_lossy`] and [`scan_string_z`].
/// Returns the index where decoding stopped.
fn decode_checked(buf: &[u8], mut i: usize, stop_at_nul: bool, out: &mut Vec<u16>) -> usize {
    while let Some(&lead) = buf.get(i) {
        if lead == 0 && stop_at_nul {
            break;
        }
        i += 1;
        if lead < 0x80 {
            out.push(u16::from(lead));
            continue;
        }
        if !(0xC0..=0xF7).contains(&lead) {
            out.push(REPLACEMENT);
            continue;
        }

        let width = utf8_symbol_length(lead);
        let mut codepoint = u32::from(lead & LEAD_MASK[width]);
        let mut complete = true;
        for _ in 1..width {
            match buf.get(i) {
                Some(&b) if is_continuation(b) => {
                    codepoint = (codepoint << 6) | u32::from(b & 0x3F);
                    i += 1;
                }
                // ASCII (NUL included) or a new lead: leave it for the next
                // iteration.
                _ => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            push_codepoint(out, codepoint);
        } else {
            out.push(REPLACEMENT);
        }
    }
    i
}

/// Output slot of [`scan_string_z`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanEntity {
    /// Decoded text of the scanned run.
    pub value: Vec<u16>,
    /// Index where the scan stopped: the NUL terminator, or `buf.len()`
    /// (one past the last consumed byte) when the buffer ran out first. In
    /// both cases it is the index of the first byte not decoded.
    pub end: usize,
}

/// Decodes the NUL-terminated UTF-8 run starting at `start`.
///
/// Fills `entity` (reusing its allocation) and returns the index just past
/// the terminator. When the buffer ends first there is no terminator to step
/// over: both the return value and `entity.end` are `buf.len()`, never the
/// index of the last byte.
///
/// Malformed sequences follow [`decode_utf8_lossy`]. A 4-byte sequence that
/// encodes a BMP value is emitted as that single unit.
///
/// ```rust
/// use utf8modem::{ScanEntity, scan_string_z};
///
/// let mut entity = ScanEntity::default();
/// assert_eq!(scan_string_z(b"ab\0cd", 0, &mut entity), 3);
/// assert_eq!(entity.value, [0x61, 0x62]);
/// assert_eq!(entity.end, 2);
/// ```
pub fn scan_string_z(buf: &[u8], start: usize, entity: &mut ScanEntity) -> usize {
    entity.value.clear();
    let end = decode_checked(buf, start.min(buf.len()), true, &mut entity.value);
    entity.end = end;
    if end < buf.len() { end + 1 } else { end }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use rstest::rstest;

    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn encode(text: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_utf8_to_vec(text, &mut out);
        out
    }

    #[test]
    fn encode_hello() {
        assert_eq!(encode(&units("Hello")), [0x48, 0x65, 0x6C, 0x6C, 0x6F]);
    }

    #[rstest]
    #[case(0x24, &[0x24])]
    #[case(0xA2, &[0xC2, 0xA2])]
    #[case(0x7FF, &[0xDF, 0xBF])]
    #[case(0x800, &[0xE0, 0xA0, 0x80])]
    #[case(0x20AC, &[0xE2, 0x82, 0xAC])]
    #[case(0xFFFF, &[0xEF, 0xBF, 0xBF])]
    fn encode_bmp_widths(#[case] code: u16, #[case] expected: &[u8]) {
        assert_eq!(encode(&[code]), expected);
        assert_eq!(decode_utf8(expected), [code]);
    }

    #[test]
    fn encode_surrogate_pair() {
        let text = units("\u{1F600}");
        assert_eq!(text.len(), 2);
        assert_eq!(encode(&text), "\u{1F600}".as_bytes());
        assert_eq!(byte_length(&text), 6);
    }

    #[rstest]
    #[case::lone_high(&[0xD800])]
    #[case::lone_low(&[0xDC00])]
    #[case::reversed(&[0xDC00, 0xD800])]
    #[case::high_then_ascii(&[0xD800, 0x41])]
    fn encode_unpaired_surrogates_as_replacement(#[case] text: &[u16]) {
        let bytes = encode(text);
        assert_eq!(&bytes[..3], &[0xEF, 0xBF, 0xBD]);
        assert_eq!(decode_utf8(&bytes)[0], REPLACEMENT);
    }

    #[test]
    fn pair_split_by_range_is_not_combined() {
        let text = units("\u{1F600}");
        // Only the high half is in range.
        assert_eq!(encode(&text[..1]), [0xEF, 0xBF, 0xBD]);
    }

    #[test]
    fn encode_at_offset() {
        let mut buf = [0u8; 8];
        buf[0] = b'x';
        let end = encode_utf8(&units("é!"), &mut buf, 1);
        assert_eq!(end, 4);
        assert_eq!(&buf[..end], "xé!".as_bytes());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn encode_past_target_panics() {
        let mut buf = [0u8; 2];
        encode_utf8(&units("abc"), &mut buf, 0);
    }

    #[test]
    fn try_encode_reports_capacity() {
        let mut buf = [0u8; 4];
        let text = units("\u{1F600}");
        // Worst case is 6 even though 4 would do.
        assert_eq!(
            try_encode_utf8(&text, &mut buf, 0),
            Err(CodecError::InsufficientCapacity {
                needed: 6,
                available: 4
            })
        );
        let mut buf = [0u8; 6];
        assert_eq!(try_encode_utf8(&text, &mut buf, 0), Ok(4));
        assert_eq!(
            try_encode_utf8(&text, &mut buf, 9),
            Err(CodecError::InsufficientCapacity {
                needed: 6,
                available: 0
            })
        );
    }

    #[test]
    fn overlong_nul_and_surrogates() {
        let text = [0x61, 0x00, 0xD83D, 0xDE00, 0x62];
        let mut out = Vec::new();
        let n = encode_utf8_overlong_to_vec(&text, &mut out);
        assert_eq!(
            out,
            [0x61, 0xC0, 0x80, 0xEF, 0xBF, 0xBD, 0xEF, 0xBF, 0xBD, 0x62]
        );
        assert_eq!(n, out.len());
        assert!(!out.contains(&0));
        assert!(overlong_byte_length(&text) >= n);
    }

    #[test]
    fn try_overlong_counts_nul_twice() {
        let mut buf = [0u8; 1];
        assert_eq!(
            try_encode_utf8_overlong(&[0], &mut buf, 0),
            Err(CodecError::InsufficientCapacity {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn decode_euro() {
        assert_eq!(decode_utf8(&[0xE2, 0x82, 0xAC]), [0x20AC]);
    }

    #[test]
    fn decode_four_byte_to_pair() {
        assert_eq!(decode_utf8("\u{10437}".as_bytes()), [0xD801, 0xDC37]);
    }

    #[rstest]
    #[case::stray_continuation(&[0x80, 0x41], &[REPLACEMENT, 0x41])]
    #[case::invalid_lead(&[0xF8, 0x41], &[REPLACEMENT, 0x41])]
    #[case::truncated(&[0x41, 0xE2, 0x82], &[0x41, REPLACEMENT])]
    #[case::out_of_range(&[0xF7, 0xBF, 0xBF, 0xBF], &[REPLACEMENT])]
    // Unchecked: 0x41 is taken as a continuation.
    #[case::unchecked_continuation(&[0xC3, 0x41], &[0xC1])]
    fn decode_malformed(#[case] bytes: &[u8], #[case] expected: &[u16]) {
        assert_eq!(decode_utf8(bytes), expected);
    }

    #[rstest]
    #[case::ascii_in_continuation(&[0xC3, 0x41], &[REPLACEMENT, 0x41])]
    #[case::lead_in_continuation(&[0xE2, 0xC3, 0xA9], &[REPLACEMENT, 0xE9])]
    #[case::truncated(&[0xF0, 0x9F, 0x98], &[REPLACEMENT])]
    #[case::stray(&[0xBF], &[REPLACEMENT])]
    #[case::overlong_four_byte(&[0xF0, 0x80, 0x81, 0x81], &[0x41])]
    fn decode_lossy_malformed(#[case] bytes: &[u8], #[case] expected: &[u16]) {
        assert_eq!(decode_utf8_lossy(bytes), expected);
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(b"abc", 0)]
    #[case(&[0x61, 0xC3], 1)]
    #[case(&[0x61, 0xE2], 1)]
    #[case(&[0x61, 0xE2, 0x82], 2)]
    #[case(&[0xF0], 1)]
    #[case(&[0xF0, 0x9F], 2)]
    #[case(&[0xF0, 0x9F, 0x98], 3)]
    #[case(&[0xF0, 0x9F, 0x98, 0x80], 0)]
    #[case(&[0xE2, 0x82, 0xAC], 0)]
    #[case(&[0xC3, 0xA9], 0)]
    #[case::ascii_after_lead(&[0xE2, 0x41], 0)]
    #[case::lead_after_lead(&[0xF0, 0xE2], 1)]
    #[case::invalid_lead(&[0x61, 0xF8], 0)]
    #[case::invalid_lead_with_tail(&[0xF8, 0x80, 0x80], 0)]
    #[case::stray_after_complete(&[0xC3, 0xA9, 0xA9], 0)]
    #[case::only_continuations(&[0x80, 0x80, 0x80], 0)]
    fn fragment_bytes(#[case] bytes: &[u8], #[case] expected: usize) {
        assert_eq!(utf8_fragment_bytes(bytes), expected);
    }

    #[rstest]
    #[case(&[0x82, 0xAC, 0x41], 3, 2)]
    #[case(&[0x82, 0xAC, 0x41], 1, 1)]
    #[case(&[0x41, 0x82], 3, 0)]
    #[case(&[0x82, 0xC3], 3, 1)]
    #[case(&[], 3, 0)]
    fn continuation_run(#[case] bytes: &[u8], #[case] wanted: usize, #[case] expected: usize) {
        assert_eq!(utf8_continuation_run(bytes, wanted), expected);
    }

    #[rstest]
    #[case(0x41, 1)]
    #[case(0x80, 1)]
    #[case(0xC3, 2)]
    #[case(0xE2, 3)]
    #[case(0xF0, 4)]
    fn symbol_length(#[case] lead: u8, #[case] expected: usize) {
        assert_eq!(utf8_symbol_length(lead), expected);
    }

    #[rstest]
    #[case("")]
    #[case("plain")]
    #[case("aé€b")]
    #[case("a\u{1F600}b")]
    fn string_length_matches_utf16_len(#[case] s: &str) {
        assert_eq!(
            string_length(s.as_bytes(), Encoding::Utf8),
            s.encode_utf16().count()
        );
    }

    #[rstest]
    #[case::four_byte_lead_counts_two(&[0xF0, 0x9F, 0x98, 0x80], 2)]
    #[case::bare_four_byte_lead(&[0xF4], 2)]
    #[case::three_byte_lead(&[0xE2, 0x82, 0xAC], 1)]
    #[case::continuations_count_zero(&[0x80, 0xBF], 0)]
    #[case::invalid_leads_count_one(&[0xF8, 0xFF], 2)]
    fn string_length_utf8_by_lead(#[case] bytes: &[u8], #[case] expected: usize) {
        assert_eq!(string_length(bytes, Encoding::Utf8), expected);
    }

    #[test]
    fn string_length_other_encodings() {
        let buf = [0u8; 7];
        assert_eq!(string_length(&buf, Encoding::Hex), 14);
        assert_eq!(string_length(&buf, Encoding::Base64), 12);
        assert_eq!(string_length(&buf, Encoding::Utf16Le), 3);
        assert_eq!(string_length(&buf, Encoding::Latin1), 7);
    }

    #[test]
    fn scan_lone_terminator() {
        let mut entity = ScanEntity::default();
        assert_eq!(scan_string_z(&[0x00], 0, &mut entity), 1);
        assert!(entity.value.is_empty());
        assert_eq!(entity.end, 0);
    }

    #[test]
    fn scan_without_terminator() {
        let mut entity = ScanEntity {
            value: vec![0x7A],
            end: 99,
        };
        let buf = "hé".as_bytes();
        assert_eq!(scan_string_z(buf, 0, &mut entity), buf.len());
        assert_eq!(entity.value, units("hé"));
        assert_eq!(entity.end, buf.len());

        // Resuming at the end finds nothing and stays there.
        assert_eq!(scan_string_z(buf, buf.len(), &mut entity), buf.len());
        assert!(entity.value.is_empty());
        assert_eq!(scan_string_z(buf, buf.len() + 5, &mut entity), buf.len());
        assert_eq!(entity.end, buf.len());
    }

    #[test]
    fn scan_consecutive_runs() {
        let buf = b"one\0two\0";
        let mut entity = ScanEntity::default();
        let next = scan_string_z(buf, 0, &mut entity);
        assert_eq!(entity.value, units("one"));
        let last = scan_string_z(buf, next, &mut entity);
        assert_eq!(entity.value, units("two"));
        assert_eq!((entity.end, last), (7, 8));
        assert_eq!(scan_string_z(buf, last, &mut entity), 8);
        assert!(entity.value.is_empty());
    }

    #[test]
    fn scan_nul_inside_symbol_terminates() {
        let mut entity = ScanEntity::default();
        assert_eq!(scan_string_z(&[0x41, 0xE2, 0x00, 0x42], 0, &mut entity), 3);
        assert_eq!(entity.value, [0x41, REPLACEMENT]);
        assert_eq!(entity.end, 2);
    }

    #[test]
    fn scan_supplementary() {
        let mut buf = "x\u{1F600}".as_bytes().to_vec();
        buf.push(0);
        let mut entity = ScanEntity::default();
        assert_eq!(scan_string_z(&buf, 0, &mut entity), buf.len());
        assert_eq!(entity.value, units("x\u{1F600}"));
    }

    #[test]
    fn every_bmp_scalar_roundtrips() {
        let mut buf = [0u8; 3];
        for code in (0..=0xD7FF_u16).chain(0xE000..=0xFFFF) {
            let n = encode_utf8(&[code], &mut buf, 0);
            assert_eq!(decode_utf8(&buf[..n]), [code], "{code:#06x}");
            assert_eq!(decode_utf8_lossy(&buf[..n]), [code], "{code:#06x}");
        }
    }

    #[test]
    fn every_lone_surrogate_decodes_to_replacement() {
        let mut buf = [0u8; 3];
        for code in 0xD800..=0xDFFF_u16 {
            let n = encode_utf8(&[code], &mut buf, 0);
            assert_eq!(decode_utf8(&buf[..n]), [REPLACEMENT]);
        }
    }
}
