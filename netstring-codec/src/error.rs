//! Codec error types.

use thiserror::Error;

/// Errors surfaced by netstring decoding.
///
/// Malformed framing is deliberately not represented here. Bad length
/// fields and missing terminators are skipped by the decoder so that the
/// rest of the stream stays readable. The one condition a caller must be
/// told about is a stream that ends in the middle of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetstringError {
    /// The stream ended while a frame's length field or payload was still
    /// incomplete.
    #[error("stream ended inside a frame ({buffered} bytes pending)")]
    Truncated {
        /// Number of unresolved bytes left in the caller's buffer.
        buffered: usize,
    },
}
