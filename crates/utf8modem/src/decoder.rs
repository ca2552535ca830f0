//! Chunk-boundary safe streaming decoder.
//!
//! A [`StreamDecoder`] turns a sequence of byte chunks into text segments.
//! Bytes at the end of a chunk that begin a symbol the chunk does not finish
//! are held back in a small fragment buffer and completed from the next
//! chunk, so the concatenated segments do not depend on where the chunks
//! were cut, whether or not the input is well formed.
//!
//! States are implicit in the fragment length: idle when it is zero, pending
//! otherwise.
//!
//! ```text
//!            write(chunk)                    write(chunk)
//!   idle ───────────────────▶ pending ─────────────────────▶ pending (still short)
//!    ▲   trailing partial      │   fill to needed length         │
//!    │   symbol held back      │   decode fragment, then         │
//!    │                         │   decode rest of chunk          │
//!    └──── end() flushes ◀─────┴─────────────────────────────────┘
//! ```

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::BStr;

use crate::{CodecError, Encoding};

/// Fragment capacity. Twice the widest symbol of any [`Encoding`].
const FRAGMENT_CAPACITY: usize = 8;

/// Incrementally decodes byte chunks into 16-bit text.
///
/// `write` takes `&mut self`; a decoder has exactly one writer at a time and
/// should not be shared between streams.
///
/// ```rust
/// use utf8modem::StreamDecoder;
///
/// let mut decoder = StreamDecoder::new("utf8")?;
/// assert!(decoder.write(&[0xE2]).is_empty());
/// assert_eq!(decoder.write(&[0x82, 0xAC]), [0x20AC]);
/// assert!(decoder.end(None).is_empty());
/// # Ok::<(), utf8modem::CodecError>(())
/// ```
#[derive(Clone)]
pub struct StreamDecoder {
    encoding: Encoding,
    fragment: [u8; FRAGMENT_CAPACITY],
    fragment_len: usize,
    needed_len: usize,
}

impl StreamDecoder {
    /// Creates a decoder for the encoding called `name`.
    ///
    /// Names are matched ignoring ASCII case, `-` and `_`; see
    /// [`Encoding`]'s `FromStr` for the accepted aliases.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownEncoding`] if `name` is not recognized.
    pub fn new(name: &str) -> Result<Self, CodecError> {
        Ok(Self::with_encoding(name.parse()?))
    }

    /// Creates a decoder for `encoding`.
    #[must_use]
    pub const fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            fragment: [0; FRAGMENT_CAPACITY],
            fragment_len: 0,
            needed_len: 0,
        }
    }

    /// The encoding this decoder was built for.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Bytes held back from previous writes.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.fragment[..self.fragment_len]
    }

    /// Total length of the symbol the pending bytes start, or 0 when idle.
    #[must_use]
    pub const fn needed_length(&self) -> usize {
        self.needed_len
    }

    /// Whether no bytes are held back.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.fragment_len == 0
    }

    /// Decodes `chunk`, returning the text of every symbol completed so far.
    ///
    /// A pending fragment is completed first from the front of `chunk`. If
    /// `chunk` runs out before the fragment is complete, the bytes are kept
    /// and nothing is returned. A UTF-8 fragment followed by a byte that is
    /// not a continuation byte is decoded as it stands (U+FFFD) and that byte
    /// starts the rest of the chunk.
    pub fn write(&mut self, chunk: &[u8]) -> Vec<u16> {
        let mut out = Vec::new();
        let mut rest = chunk;

        if self.fragment_len > 0 {
            let wanted = self.needed_len.saturating_sub(self.fragment_len);
            let take = self.encoding.fragment_fill(rest, wanted);
            let (head, tail) = rest.split_at(take);
            self.fragment[self.fragment_len..self.fragment_len + take].copy_from_slice(head);
            self.fragment_len += take;
            rest = tail;

            if self.fragment_len < self.needed_len {
                if rest.is_empty() {
                    tracing::trace!(
                        encoding = %self.encoding,
                        pending = ?BStr::new(self.pending()),
                        needed = self.needed_len,
                        "fragment still incomplete"
                    );
                    return out;
                }
                // The next byte cannot continue the symbol.
                tracing::trace!(
                    encoding = %self.encoding,
                    fragment = ?BStr::new(self.pending()),
                    "fragment cut short"
                );
            } else {
                tracing::trace!(
                    encoding = %self.encoding,
                    fragment = ?BStr::new(self.pending()),
                    "fragment completed"
                );
            }
            self.encoding.decode_into(self.pending(), &mut out);
        }

        let held = self.encoding.trailing_fragment_size(rest);
        let (body, tail) = rest.split_at(rest.len() - held);
        self.encoding.decode_into(body, &mut out);
        self.hold(tail);
        out
    }

    /// Finishes the stream.
    ///
    /// Writes `chunk` if given, then decodes whatever fragment is still
    /// pending even though it is incomplete, which typically yields U+FFFD
    /// for UTF-8. The decoder is idle afterwards and can be reused.
    pub fn end(&mut self, chunk: Option<&[u8]>) -> Vec<u16> {
        let mut out = match chunk {
            Some(chunk) if !chunk.is_empty() => self.write(chunk),
            _ => Vec::new(),
        };
        if self.fragment_len > 0 {
            tracing::debug!(
                encoding = %self.encoding,
                pending = ?BStr::new(self.pending()),
                needed = self.needed_len,
                "flushing incomplete fragment"
            );
            self.encoding.decode_into(self.pending(), &mut out);
        }
        self.reset();
        out
    }

    /// [`write`](Self::write), converted to a `String`.
    ///
    /// Unpaired surrogates become U+FFFD. With [`Encoding::Utf16Le`] a
    /// surrogate pair can straddle two segments, so prefer [`write`] there.
    ///
    /// [`write`]: Self::write
    pub fn write_str(&mut self, chunk: &[u8]) -> String {
        String::from_utf16_lossy(&self.write(chunk))
    }

    /// [`end`](Self::end), converted to a `String`.
    pub fn end_str(&mut self, chunk: Option<&[u8]>) -> String {
        String::from_utf16_lossy(&self.end(chunk))
    }

    /// Drops any pending bytes.
    pub fn reset(&mut self) {
        self.fragment_len = 0;
        self.needed_len = 0;
    }

    fn hold(&mut self, tail: &[u8]) {
        debug_assert!(tail.len() < self.encoding.max_symbol_width().max(2));
        self.fragment[..tail.len()].copy_from_slice(tail);
        self.fragment_len = tail.len();
        self.needed_len = match tail.first() {
            Some(&lead) => self.encoding.symbol_length(lead),
            None => 0,
        };
        if !tail.is_empty() {
            tracing::trace!(
                encoding = %self.encoding,
                held = ?BStr::new(tail),
                needed = self.needed_len,
                "holding back partial symbol"
            );
        }
    }
}

impl Default for StreamDecoder {
    /// A UTF-8 decoder.
    fn default() -> Self {
        Self::with_encoding(Encoding::Utf8)
    }
}

impl fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("encoding", &self.encoding)
            .field("pending", &BStr::new(self.pending()))
            .field("needed_len", &self.needed_len)
            .finish()
    }
}
