//! Byte-level text codecs for 16-bit strings.
//!
//! `utf8modem` converts between UTF-16 code units and UTF-8 bytes, writes
//! JSON-escaped string bodies, and incrementally decodes byte streams whose
//! multi-byte characters may straddle chunk boundaries.
//!
//! - [`utf8`]: encode, decode, sizing and NUL-terminated scanning.
//! - [`json`]: the JSON string body encoder built on the UTF-8 encoder.
//! - [`StreamDecoder`]: the chunk-boundary safe decoder, parameterized by an
//!   [`Encoding`].
//! - [`base64`]: a small encoder for embedding binary payloads.
//!
//! Text is handled as `&[u16]` on input and `Vec<u16>` on output, since
//! decoded text may legitimately carry unpaired surrogates.
//!
//! ```rust
//! use utf8modem::{StreamDecoder, utf8};
//!
//! let text: Vec<u16> = "€".encode_utf16().collect();
//! let mut buf = vec![0; utf8::byte_length(&text)];
//! let n = utf8::encode_utf8(&text, &mut buf, 0);
//! assert_eq!(&buf[..n], &[0xE2, 0x82, 0xAC]);
//!
//! let mut decoder = StreamDecoder::default();
//! assert!(decoder.write(&buf[..1]).is_empty());
//! assert_eq!(decoder.write(&buf[1..n]), text);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod base64;
mod chunk_utils;
mod decoder;
mod encoding;
mod error;
pub mod json;
pub mod utf8;

#[cfg(test)]
mod tests;

pub use chunk_utils::{produce_chunks, split_at_offsets};
pub use decoder::StreamDecoder;
pub use encoding::Encoding;
pub use error::CodecError;
pub use json::{encode_json, encode_json_to_vec, json_byte_length, try_encode_json};
pub use utf8::{
    ScanEntity, byte_length, decode_utf8, decode_utf8_lossy, encode_utf8, encode_utf8_overlong,
    encode_utf8_to_vec, scan_string_z, string_length,
};

/// The Unicode replacement character as a UTF-16 code unit.
pub const REPLACEMENT: u16 = 0xFFFD;
