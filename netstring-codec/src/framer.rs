//! Incremental frame parser.
//!
//! [`Framer`] is the state machine at the core of the crate. It holds no
//! buffer of its own: the caller owns a buffer of pending stream bytes and
//! repeatedly offers it to [`Framer::step`], discarding exactly the number
//! of bytes each call reports as consumed. This keeps the parser usable
//! from blocking readers, async codecs, and hand-rolled poll loops alike.

use crate::error::NetstringError;
use crate::frame::{COLON, COMMA};

/// Parser position within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    /// Looking for a length field at the start of the buffer.
    #[default]
    ScanningLength,
    /// Length field parsed; waiting for the payload and its terminator to
    /// arrive in full.
    AwaitingPayload {
        /// Declared payload length in bytes.
        length: usize,
        /// Offset of the length-terminating colon in the caller's buffer.
        colon: usize,
    },
}

/// Outcome of one [`Framer::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Number of leading buffer bytes this call fully processed. The caller
    /// must discard exactly this many bytes before the next call.
    pub consumed: usize,
    /// Payload of a complete frame, if this call produced one. Borrowed
    /// from the caller's buffer.
    pub payload: Option<&'a [u8]>,
}

impl Step<'_> {
    /// Returns true when the call made no progress and needs more input.
    ///
    /// `consumed == 0` is the only "need more data" signal; a step that
    /// yields a payload always consumes at least the frame itself.
    pub fn is_incomplete(&self) -> bool {
        self.consumed == 0
    }
}

/// Incremental netstring parser over a caller-owned buffer.
///
/// # Driving contract
///
/// Each [`step`](Framer::step) call scans the buffer from its start. The
/// caller must, between calls, discard exactly [`Step::consumed`] bytes
/// from the front of the buffer and may append newly arrived bytes at the
/// end. A step with `consumed == 0` asks for more input: keep the buffer
/// intact, append to it, and call again. Growing the buffer never changes
/// what the retained bytes mean, so re-offering a longer buffer after an
/// incomplete step is always safe.
///
/// # Recovery
///
/// Malformed framing does not produce errors. A byte that cannot belong to
/// a length field is dropped, an unparseable length field is dropped
/// through its colon, and a frame whose terminator byte is not a comma is
/// dropped as a whole declared span. In every case the parser returns to
/// scanning for the next length field, so one corrupt frame costs at most
/// its own span of the stream.
///
/// The only error is [`NetstringError::Truncated`]: the caller passed
/// `eof = true`, the buffer still holds bytes, and no amount of scanning
/// can resolve them without further input.
#[derive(Debug, Default)]
pub struct Framer {
    phase: Phase,
}

impl Framer {
    /// Creates a parser ready to scan for a length field.
    pub fn new() -> Self {
        Self {
            phase: Phase::ScanningLength,
        }
    }

    /// Advances the parser over the front of `input`.
    ///
    /// `eof` declares that no bytes beyond `input` will ever arrive. It is
    /// safe to keep calling with `eof = true`: remaining complete frames
    /// are still emitted and junk is still skipped, and only a genuinely
    /// unfinishable tail reports [`NetstringError::Truncated`].
    pub fn step<'a>(&mut self, input: &'a [u8], eof: bool) -> Result<Step<'a>, NetstringError> {
        let (length, colon) = match self.phase {
            Phase::AwaitingPayload { length, colon } => (length, colon),
            Phase::ScanningLength => match self.scan_length(input, eof)? {
                Scan::Found { length, colon } => (length, colon),
                Scan::Done(step) => return Ok(step),
            },
        };

        // The comma must sit exactly one byte past the declared payload. A
        // length so large that the position overflows can never be
        // satisfied; drop the length field like any other bad one.
        let comma = match colon.checked_add(length).and_then(|end| end.checked_add(1)) {
            Some(comma) => comma,
            None => {
                self.phase = Phase::ScanningLength;
                return Ok(Step {
                    consumed: colon + 1,
                    payload: None,
                });
            }
        };

        if comma >= input.len() {
            return self.incomplete(input, eof);
        }

        self.phase = Phase::ScanningLength;
        let payload = if input[comma] == COMMA {
            Some(&input[colon + 1..comma])
        } else {
            // Terminator mismatch. The declared span is consumed wholesale,
            // even if it swallowed the start of a following valid frame;
            // scanning resumes right after it.
            None
        };
        Ok(Step {
            consumed: comma + 1,
            payload,
        })
    }

    /// Scans for a length field at the start of `input`.
    ///
    /// On success stores and returns the parsed length and colon offset.
    /// Otherwise yields the finished [`Step`]: a skip past an unusable byte
    /// or length field, or an incomplete step when the buffer ran out
    /// before a colon appeared.
    fn scan_length<'a>(&mut self, input: &'a [u8], eof: bool) -> Result<Scan<'a>, NetstringError> {
        for (pos, &byte) in input.iter().enumerate() {
            match byte {
                b'0'..=b'9' => continue,
                COLON => {
                    return Ok(match parse_length(&input[..pos]) {
                        Some(length) => {
                            self.phase = Phase::AwaitingPayload { length, colon: pos };
                            Scan::Found { length, colon: pos }
                        }
                        // Empty digit run or an overflowing value. Drop the
                        // field and its colon, keep scanning after them.
                        None => Scan::Done(Step {
                            consumed: pos + 1,
                            payload: None,
                        }),
                    });
                }
                // Not part of a length field. Drop it and rescan from the
                // next byte.
                _ => {
                    return Ok(Scan::Done(Step {
                        consumed: pos + 1,
                        payload: None,
                    }))
                }
            }
        }
        // Ran out of buffer before the colon; nothing consumed, so the next
        // call rescans the same digits plus whatever arrived since.
        self.incomplete(input, eof).map(Scan::Done)
    }

    /// Reports an incomplete step, or [`NetstringError::Truncated`] when no
    /// further input can ever arrive to complete the frame.
    fn incomplete<'a>(&mut self, input: &'a [u8], eof: bool) -> Result<Step<'a>, NetstringError> {
        if eof && !input.is_empty() {
            self.phase = Phase::ScanningLength;
            return Err(NetstringError::Truncated {
                buffered: input.len(),
            });
        }
        Ok(Step {
            consumed: 0,
            payload: None,
        })
    }
}

/// Result of scanning for a length field.
enum Scan<'a> {
    /// A parseable length field ending in a colon.
    Found { length: usize, colon: usize },
    /// No usable length field; the step to report instead.
    Done(Step<'a>),
}

/// Parses the digit run preceding a colon as a payload length.
///
/// Leading zeros are accepted (`007` means seven). Empty runs and values
/// that overflow `usize` are rejected.
fn parse_length(digits: &[u8]) -> Option<usize> {
    // The scanner only lets ASCII digits through, so the run is valid UTF-8
    // and free of signs and whitespace.
    std::str::from_utf8(digits).ok()?.parse().ok()
}
