//! Netstring wire format and encoder.
//!
//! A frame is the payload length in ASCII decimal, a colon, the payload
//! bytes verbatim, and a comma:
//!
//! ```text
//! +----------------+-----+----------------+-----+
//! | length         | ':' | payload        | ',' |
//! | 1+ ASCII digits|     | <length> bytes |     |
//! +----------------+-----+----------------+-----+
//! ```
//!
//! There is no escaping. The payload may contain any byte values, colons
//! and commas included; only the length prefix delimits it. `"hello"`
//! encodes as `5:hello,` and the empty payload as `0:,`.

use std::fmt::Write;

use bytes::{BufMut, BytesMut};

/// Terminates the length field.
pub const COLON: u8 = b':';

/// Terminates the frame.
pub const COMMA: u8 = b',';

/// Returns the exact encoded size of a frame carrying `payload_len` bytes.
///
/// Useful for sizing buffers ahead of [`encode_to`].
pub fn encoded_len(payload_len: usize) -> usize {
    decimal_digits(payload_len) + 1 + payload_len + 1
}

/// Encodes one payload as a netstring frame.
pub fn encode(payload: impl AsRef<[u8]>) -> BytesMut {
    let payload = payload.as_ref();
    let mut buf = BytesMut::with_capacity(encoded_len(payload.len()));
    encode_to(&mut buf, payload);
    buf
}

/// Appends one netstring frame to `buf`.
///
/// Reserves the exact frame size up front, so repeated calls can stream
/// frames into a single buffer without intermediate allocations.
pub fn encode_to(buf: &mut BytesMut, payload: impl AsRef<[u8]>) {
    let payload = payload.as_ref();
    buf.reserve(encoded_len(payload.len()));
    write!(buf, "{}", payload.len()).expect("write to BytesMut cannot fail");
    buf.put_u8(COLON);
    buf.put_slice(payload);
    buf.put_u8(COMMA);
}

fn decimal_digits(n: usize) -> usize {
    match n.checked_ilog10() {
        Some(digits) => digits as usize + 1,
        None => 1,
    }
}
