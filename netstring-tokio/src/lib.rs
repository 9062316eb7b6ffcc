//! # netstring-tokio
//!
//! Tokio codec integration for netstring framing.
//!
//! [`NetstringCodec`] implements `tokio_util::codec::Decoder` and
//! `Encoder`, so a framed transport is one constructor away:
//!
//! ```ignore
//! let mut frames = FramedRead::new(socket, NetstringCodec::new());
//! while let Some(payload) = frames.next().await {
//!     handle(payload?);
//! }
//! ```
//!
//! Decoding skips malformed framing the same way the blocking stack in
//! `netstring-io` does; only a transport that closes mid-frame surfaces
//! an error.

pub mod codec;
pub mod error;

pub use codec::NetstringCodec;
pub use error::CodecError;
