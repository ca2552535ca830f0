use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{CodecError, base64, utf8};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Byte encodings understood by [`crate::StreamDecoder`].
///
/// Each encoding knows how many trailing bytes of a chunk belong to a symbol
/// the chunk does not complete, how long a symbol is given its first byte,
/// and how to render whole symbols as 16-bit text.
///
/// | encoding  | held back at chunk end            | symbol length        |
/// |-----------|-----------------------------------|----------------------|
/// | `Utf8`    | lead-byte scan of the last 3      | 2, 3 or 4 from lead  |
/// | `Utf16Le` | 1 if the length is odd            | 2                    |
/// | `Base64`  | length mod 3                      | 3                    |
/// | others    | 0                                 | 1                    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8 rendered to UTF-16, malformed input replaced with U+FFFD.
    #[default]
    Utf8,
    /// Little-endian UTF-16 code units. Also known as `ucs2`.
    Utf16Le,
    /// Bytes rendered as padded standard base64 text.
    Base64,
    /// Bytes rendered as lowercase hex digits.
    Hex,
    /// Each byte is one code unit. Also known as `binary`.
    Latin1,
    /// Each byte masked to 7 bits.
    Ascii,
}

impl Encoding {
    /// Every encoding, in declaration order.
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Base64,
        Encoding::Hex,
        Encoding::Latin1,
        Encoding::Ascii,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Base64 => "base64",
            Encoding::Hex => "hex",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
        }
    }

    /// Widest symbol, in bytes.
    #[must_use]
    pub const fn max_symbol_width(self) -> usize {
        match self {
            Encoding::Utf8 => 4,
            Encoding::Base64 => 3,
            Encoding::Utf16Le => 2,
            Encoding::Hex | Encoding::Latin1 | Encoding::Ascii => 1,
        }
    }

    /// Number of bytes at the end of `buf` that start a symbol `buf` does not
    /// complete.
    #[must_use]
    pub fn trailing_fragment_size(self, buf: &[u8]) -> usize {
        match self {
            Encoding::Utf8 => utf8::utf8_fragment_bytes(buf),
            Encoding::Utf16Le => buf.len() & 1,
            Encoding::Base64 => buf.len() % 3,
            Encoding::Hex | Encoding::Latin1 | Encoding::Ascii => 0,
        }
    }

    /// Number of leading bytes of `buf`, at most `wanted`, that extend a held
    /// fragment.
    ///
    /// UTF-8 stops at the first byte that is not `10xxxxxx`, so that byte is
    /// decoded on its own just as it would be without a chunk boundary.
    #[must_use]
    pub fn fragment_fill(self, buf: &[u8], wanted: usize) -> usize {
        match self {
            Encoding::Utf8 => utf8::utf8_continuation_run(buf, wanted),
            _ => wanted.min(buf.len()),
        }
    }

    /// Length of the symbol that starts with `lead`, for a held-back
    /// fragment.
    ///
    /// For UTF-8 anything below `1110xxxx` is taken to be a 2-byte lead,
    /// which is the shortest symbol that can be split.
    #[must_use]
    pub fn symbol_length(self, lead: u8) -> usize {
        match self {
            Encoding::Utf8 => utf8::utf8_symbol_length(lead).max(2),
            _ => self.max_symbol_width(),
        }
    }

    /// Renders `buf` as 16-bit text.
    #[must_use]
    pub fn decode(self, buf: &[u8]) -> Vec<u16> {
        let mut out = Vec::new();
        self.decode_into(buf, &mut out);
        out
    }

    /// Appends the rendering of `buf` to `out`.
    ///
    /// A trailing partial symbol is rendered best-effort: UTF-8 emits U+FFFD,
    /// UTF-16 drops the odd byte, base64 pads.
    pub fn decode_into(self, buf: &[u8], out: &mut Vec<u16>) {
        match self {
            Encoding::Utf8 => utf8::decode_utf8_lossy_into(buf, out),
            Encoding::Utf16Le => out.extend(
                buf.chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            ),
            Encoding::Base64 => out.extend(base64::encode(buf).bytes().map(u16::from)),
            Encoding::Hex => {
                out.reserve(buf.len() * 2);
                for &b in buf {
                    out.push(u16::from(HEX_DIGITS[usize::from(b >> 4)]));
                    out.push(u16::from(HEX_DIGITS[usize::from(b & 0xF)]));
                }
            }
            Encoding::Latin1 => out.extend(buf.iter().map(|&b| u16::from(b))),
            Encoding::Ascii => out.extend(buf.iter().map(|&b| u16::from(b & 0x7F))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    /// Parses an encoding name, ignoring ASCII case, `-` and `_`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let encoding = match key.as_str() {
            "utf8" => Encoding::Utf8,
            "utf16le" | "utf16" | "ucs2" => Encoding::Utf16Le,
            "base64" => Encoding::Base64,
            "hex" => Encoding::Hex,
            "latin1" | "binary" => Encoding::Latin1,
            "ascii" => Encoding::Ascii,
            _ => {
                tracing::debug!(encoding = name, "rejecting unknown encoding");
                return Err(CodecError::UnknownEncoding(name.into()));
            }
        };
        Ok(encoding)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Encoding {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// Accepts every alias `FromStr` does, so configs can say "UTF-8" or "ucs2".
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Encoding {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <alloc::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
