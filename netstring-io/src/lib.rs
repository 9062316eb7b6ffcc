//! # netstring-io
//!
//! Blocking I/O integration for netstring framing.
//!
//! This crate provides:
//! - [`FrameReader`]: pull decoded payloads out of any [`std::io::Read`]
//! - [`FrameWriter`]: frame payloads into any [`std::io::Write`]
//! - [`Frames`]: iterate a stream's payloads
//!
//! The reader owns the chunked decode loop around a
//! [`netstring_codec::Decoder`] and inherits its recovery semantics:
//! corrupt framing is skipped, and only a stream that ends mid-frame is
//! an error.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::ReadError;
pub use reader::{FrameReader, Frames, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
pub use writer::FrameWriter;
