//! Blocking frame reader.

use std::io::{self, Read};

use bytes::Bytes;
use netstring_codec::Decoder;

use crate::error::ReadError;

/// Default transport read granularity (8 KB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Minimum transport read granularity.
pub const MIN_CHUNK_SIZE: usize = 256;

/// Maximum transport read granularity (1 MB).
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Reads netstring frames from any [`Read`] stream.
///
/// `FrameReader` owns the decode loop: it pulls chunks from the underlying
/// reader into a [`Decoder`] and hands back one payload per
/// [`read_frame`](FrameReader::read_frame) call. Malformed framing in the
/// stream is skipped; a stream that ends inside a frame yields
/// [`ReadError::Decode`].
pub struct FrameReader<R> {
    inner: R,
    decoder: Decoder,
    chunk: Vec<u8>,
    eof: bool,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader with the default chunk size.
    pub fn new(inner: R) -> Self {
        FrameReader {
            inner,
            decoder: Decoder::new(),
            chunk: vec![0u8; DEFAULT_CHUNK_SIZE],
            eof: false,
        }
    }

    /// Set the transport read granularity, clamped to
    /// [`MIN_CHUNK_SIZE`]..=[`MAX_CHUNK_SIZE`].
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk = vec![0u8; size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)];
        self
    }

    /// Read the next decoded payload.
    ///
    /// Returns `Ok(None)` at a clean end of stream; trailing junk after
    /// the last frame is skipped, not reported.
    pub fn read_frame(&mut self) -> Result<Option<Bytes>, ReadError> {
        loop {
            if self.eof {
                return Ok(self.decoder.decode_eof()?);
            }
            if let Some(payload) = self.decoder.decode_frame()? {
                tracing::trace!(len = payload.len(), "decoded frame");
                return Ok(Some(payload));
            }
            if self.fill()? == 0 {
                tracing::trace!(buffered = self.decoder.buffered(), "end of stream");
                self.eof = true;
            }
        }
    }

    /// Iterate decoded payloads until the stream ends or fails.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames {
            reader: self,
            done: false,
        }
    }

    /// Pull one chunk from the transport into the decoder. Returns the
    /// number of bytes read, zero meaning end of stream.
    fn fill(&mut self) -> Result<usize, ReadError> {
        loop {
            match self.inner.read(&mut self.chunk) {
                Ok(0) => return Ok(0),
                Ok(n) => {
                    tracing::trace!(bytes = n, "read chunk");
                    self.decoder.extend(&self.chunk[..n]);
                    return Ok(n);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl<R> FrameReader<R> {
    /// Number of bytes buffered but not yet decoded.
    pub fn buffered(&self) -> usize {
        self.decoder.buffered()
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the reader, returning the underlying transport. Buffered
    /// but undecoded bytes are discarded.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Iterator over a stream's decoded payloads.
///
/// Yields `Ok` per frame, then one `Err` if the stream fails, then
/// nothing. Fused: iteration never resumes after the first `None`.
pub struct Frames<'a, R> {
    reader: &'a mut FrameReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Frames<'_, R> {
    type Item = Result<Bytes, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_frame() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use netstring_codec::encode_to;
    use std::io::Cursor;

    /// Delivers at most one byte per read call, exercising every
    /// incomplete-step path in the decoder.
    struct OneByteReader<R>(R);

    impl<R: Read> Read for OneByteReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.0.read(&mut buf[..1])
        }
    }

    fn collect(reader: &mut FrameReader<impl Read>) -> Vec<Vec<u8>> {
        reader
            .frames()
            .map(|frame| frame.unwrap().to_vec())
            .collect()
    }

    #[test]
    fn test_read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(b"5:hello,".to_vec()));
        let payload = reader.read_frame().unwrap().unwrap();
        assert_eq!(&payload[..], b"hello");
        assert!(reader.read_frame().unwrap().is_none());
    }

    #[test]
    fn test_read_well_formed_stream() {
        let mut stream = BytesMut::new();
        let big = "z".repeat(20_000);
        for payload in ["hello, world", "", big.as_str()] {
            encode_to(&mut stream, payload);
        }

        let mut reader = FrameReader::new(Cursor::new(stream.to_vec()));
        let frames = collect(&mut reader);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], b"hello, world");
        assert_eq!(frames[1], b"");
        assert_eq!(frames[2], big.as_bytes());
    }

    #[test]
    fn test_read_one_byte_at_a_time() {
        let mut stream = BytesMut::new();
        let big = "z".repeat(20_000);
        for payload in ["hello, world", big.as_str()] {
            encode_to(&mut stream, payload);
        }

        let inner = OneByteReader(Cursor::new(stream.to_vec()));
        let mut reader = FrameReader::new(inner);
        let frames = collect(&mut reader);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], b"hello, world");
        assert_eq!(frames[1], big.as_bytes());
    }

    #[test]
    fn test_read_recovers_from_corrupt_spans() {
        // A stream with every recovery case at once: a bad length field, a
        // mismatched terminator whose declared span swallows the next
        // frame's opening digit, and the stray bytes both leave behind.
        let big = "z".repeat(300);
        let mut stream = BytesMut::new();
        encode_to(&mut stream, "abc");
        stream.extend_from_slice(b"abc:abc,");
        encode_to(&mut stream, "def");
        stream.extend_from_slice(b"2:,");
        encode_to(&mut stream, "def");
        encode_to(&mut stream, &big);

        let mut reader = FrameReader::new(Cursor::new(stream.to_vec()));
        let frames = collect(&mut reader);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], b"abc");
        assert_eq!(frames[1], b"def");
        assert_eq!(frames[2], big.as_bytes());
    }

    #[test]
    fn test_truncated_stream_errors() {
        let mut reader = FrameReader::new(Cursor::new(b"10:short".to_vec()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, ReadError::Decode(_)));
    }

    #[test]
    fn test_trailing_junk_is_clean_eof() {
        let mut reader = FrameReader::new(Cursor::new(b"3:abc,xyz".to_vec()));
        let payload = reader.read_frame().unwrap().unwrap();
        assert_eq!(&payload[..], b"abc");
        assert!(reader.read_frame().unwrap().is_none());
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn test_frames_iterator_stops_after_error() {
        let mut reader = FrameReader::new(Cursor::new(b"3:abc,9:short".to_vec()));
        let mut frames = reader.frames();

        assert_eq!(&frames.next().unwrap().unwrap()[..], b"abc");
        assert!(frames.next().unwrap().is_err());
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_chunk_size_clamping() {
        let reader = FrameReader::new(Cursor::new(Vec::new())).with_chunk_size(1);
        assert_eq!(reader.chunk.len(), MIN_CHUNK_SIZE);

        let reader = FrameReader::new(Cursor::new(Vec::new())).with_chunk_size(usize::MAX);
        assert_eq!(reader.chunk.len(), MAX_CHUNK_SIZE);

        let reader = FrameReader::new(Cursor::new(Vec::new())).with_chunk_size(4096);
        assert_eq!(reader.chunk.len(), 4096);
    }

    #[test]
    fn test_into_inner() {
        let mut reader = FrameReader::new(Cursor::new(b"2:hi,3:bye".to_vec()));
        assert_eq!(&reader.read_frame().unwrap().unwrap()[..], b"hi");

        let cursor = reader.into_inner();
        assert_eq!(cursor.position(), 10);
    }
}
