//! Codec implementation for `tokio_util` framed transports.

use bytes::{Buf, BytesMut};
use netstring_codec::{encode_to, Framer};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;

/// Netstring codec for `FramedRead` and `FramedWrite`.
///
/// Decoding drives the incremental [`Framer`] over the transport buffer:
/// complete payloads come out as [`BytesMut`], malformed framing is
/// skipped in place, and a transport that closes mid-frame errors with
/// [`CodecError::Decode`]. Encoding accepts anything byte-shaped.
#[derive(Debug, Default)]
pub struct NetstringCodec {
    framer: Framer,
}

impl NetstringCodec {
    /// Create a codec ready for a fresh transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn drain(&mut self, src: &mut BytesMut, eof: bool) -> Result<Option<BytesMut>, CodecError> {
        loop {
            let (consumed, payload_len) = {
                let step = self.framer.step(&src[..], eof)?;
                (step.consumed, step.payload.map(<[u8]>::len))
            };
            match payload_len {
                Some(len) => {
                    // Carve the payload out of the frame span in place; it
                    // ends one byte before the comma.
                    let mut frame = src.split_to(consumed);
                    frame.truncate(consumed - 1);
                    frame.advance(consumed - 1 - len);
                    return Ok(Some(frame));
                }
                None if consumed > 0 => src.advance(consumed),
                None => return Ok(None),
            }
        }
    }
}

impl Decoder for NetstringCodec {
    type Item = BytesMut;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<BytesMut>, CodecError> {
        self.drain(src, false)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<BytesMut>, CodecError> {
        self.drain(src, true)
    }
}

impl<T: AsRef<[u8]>> Encoder<T> for NetstringCodec {
    type Error = CodecError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), CodecError> {
        encode_to(dst, item);
        Ok(())
    }
}
