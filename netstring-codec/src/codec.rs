//! Buffered push-style decoder.

use bytes::{Buf, Bytes, BytesMut};

use crate::error::NetstringError;
use crate::framer::Framer;

/// Initial capacity of the working buffer.
const INITIAL_BUFFER_CAPACITY: usize = 8192;

/// Streaming decoder that accumulates bytes and yields complete payloads.
///
/// `Decoder` owns the working buffer and drives a [`Framer`] over it: feed
/// raw stream bytes with [`extend`](Decoder::extend) and drain decoded
/// payloads with [`decode_frame`](Decoder::decode_frame). Malformed
/// framing is skipped, not reported; after the last bytes were fed, use
/// [`decode_eof`](Decoder::decode_eof) to detect a truncated final frame.
pub struct Decoder {
    buffer: BytesMut,
    framer: Framer,
}

impl Decoder {
    /// Create a new empty decoder.
    pub fn new() -> Self {
        Decoder {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            framer: Framer::new(),
        }
    }

    /// Feed bytes into the decoder.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a single payload from the accumulated buffer.
    /// Returns `Ok(None)` if more data is needed.
    pub fn decode_frame(&mut self) -> Result<Option<Bytes>, NetstringError> {
        self.drain(false)
    }

    /// Like [`decode_frame`](Decoder::decode_frame), once no further input
    /// will arrive. Drains the remaining complete frames, then returns
    /// `Ok(None)` if the buffer emptied cleanly or
    /// [`NetstringError::Truncated`] if the stream ended inside a frame.
    pub fn decode_eof(&mut self) -> Result<Option<Bytes>, NetstringError> {
        self.drain(true)
    }

    fn drain(&mut self, eof: bool) -> Result<Option<Bytes>, NetstringError> {
        loop {
            let (consumed, payload_len) = {
                let step = self.framer.step(&self.buffer, eof)?;
                (step.consumed, step.payload.map(<[u8]>::len))
            };
            match payload_len {
                Some(len) => {
                    // The step spans the whole frame; carve the payload out
                    // of it without copying. It ends one byte before the
                    // comma.
                    let mut frame = self.buffer.split_to(consumed);
                    frame.truncate(consumed - 1);
                    frame.advance(consumed - 1 - len);
                    return Ok(Some(frame.freeze()));
                }
                None if consumed > 0 => {
                    // Unusable framing; drop it and keep scanning.
                    self.buffer.advance(consumed);
                }
                None => return Ok(None),
            }
        }
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the internal buffer and reset the parser.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.framer = Framer::new();
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
