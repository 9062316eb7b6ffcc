//! Error types for frame I/O.

use netstring_codec::NetstringError;
use thiserror::Error;

/// Errors surfaced while reading frames from a transport.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended inside a frame.
    #[error("decode error: {0}")]
    Decode(#[from] NetstringError),
}
