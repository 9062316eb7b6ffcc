//! Error types for the tokio codec.

use netstring_codec::NetstringError;
use thiserror::Error;

/// Errors surfaced by [`NetstringCodec`](crate::NetstringCodec).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The framed transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended inside a frame.
    #[error("decode error: {0}")]
    Decode(#[from] NetstringError),
}
