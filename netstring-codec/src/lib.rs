//! # netstring-codec
//!
//! Netstring framing for byte streams.
//!
//! A [netstring](https://cr.yp.to/proto/netstrings.txt) frame is the
//! payload length in ASCII decimal, a colon, the payload bytes verbatim,
//! and a comma: `5:hello,`. The format is self-delimiting and needs no
//! escaping, which makes it a cheap way to carry opaque records over a
//! stream transport.
//!
//! This crate provides:
//! - The wire format and encoder ([`encode`], [`encode_to`], [`encoded_len`])
//! - [`Framer`], the incremental parser for chunked delivery, driven over a
//!   caller-owned buffer one [`Step`] at a time
//! - [`Decoder`], a buffered push-style wrapper around the parser
//! - Recovery semantics that skip malformed framing without losing the
//!   rest of the stream
//!
//! Decoding is tolerant on purpose: a stream written by a well-behaved
//! peer decodes to exactly the frames it sent, while corrupt spans cost
//! only themselves. The one hard failure is [`NetstringError::Truncated`],
//! a stream that ends in the middle of a frame.

pub mod codec;
pub mod error;
pub mod frame;
pub mod framer;

pub use codec::Decoder;
pub use error::NetstringError;
pub use frame::{encode, encode_to, encoded_len, COLON, COMMA};
pub use framer::{Framer, Step};
