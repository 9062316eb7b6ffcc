//! Blocking frame writer.

use std::io::{self, Write};

use bytes::BytesMut;
use netstring_codec::encode_to;

/// Writes payloads as netstring frames to any [`Write`] sink.
///
/// One frame per [`write_frame`](FrameWriter::write_frame) call; the
/// encode buffer is reused across calls, so steady-state writes do not
/// allocate.
pub struct FrameWriter<W> {
    inner: W,
    scratch: BytesMut,
}

impl<W: Write> FrameWriter<W> {
    /// Create a writer around a sink.
    pub fn new(inner: W) -> Self {
        FrameWriter {
            inner,
            scratch: BytesMut::new(),
        }
    }

    /// Frame `payload` and write it out in full.
    pub fn write_frame(&mut self, payload: impl AsRef<[u8]>) -> io::Result<()> {
        self.scratch.clear();
        encode_to(&mut self.scratch, payload);
        self.inner.write_all(&self.scratch)?;
        tracing::trace!(len = self.scratch.len(), "wrote frame");
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W> FrameWriter<W> {
    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
