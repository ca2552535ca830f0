use alloc::string::String;

use thiserror::Error;

/// Errors surfaced by the codecs.
///
/// Malformed input is never an error: decoders substitute U+FFFD and keep
/// going. Only configuration mistakes and the opt-in capacity checks of the
/// `try_*` encoders are reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The encoding name given to [`crate::StreamDecoder::new`] or
    /// [`crate::Encoding`]'s `FromStr` is not recognized.
    #[error("unknown encoding {0:?}")]
    UnknownEncoding(String),
    /// The target buffer cannot hold the worst-case encoded output.
    #[error("target buffer too small: need {needed} bytes, have {available}")]
    InsufficientCapacity {
        /// Worst-case bytes the encoder may write.
        needed: usize,
        /// Bytes available in the target after the write offset.
        available: usize,
    },
}
