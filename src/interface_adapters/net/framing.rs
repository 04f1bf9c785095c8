// Newline-delimited JSON framing for the inbound byte stream.

use super::error::{NetError, ParseError};
use bytes::BytesMut;
use serde_json::Value;
use tokio_util::codec::Decoder;
use tracing::warn;

const DELIMITER: u8 = b'\n';

/// Reassembles `\n`-terminated JSON frames from arbitrarily split reads.
///
/// Works on raw bytes so multi-byte UTF-8 sequences may straddle reads. After `decode`
/// returns `None` the buffer holds at most one partial line. There is no line length limit.
///
/// Each item is itself a `Result`: a malformed line is a per-frame failure the session
/// recovers from, while the outer error is reserved for the transport.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    // Bytes already searched for a delimiter, so long partial lines are not rescanned.
    scanned: usize,
    consumed: u64,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes taken off the stream so far, including blank lines and a discarded tail.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl Decoder for FrameDecoder {
    type Item = Result<Value, ParseError>;
    type Error = NetError;

    /// Removes and decodes the next complete line.
    ///
    /// Blank lines are skipped; each non-blank line gets exactly one parse attempt, and a
    /// malformed line is consumed so it cannot block the frames behind it.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let start = self.scanned.min(src.len());
            let Some(offset) = src[start..].iter().position(|&b| b == DELIMITER) else {
                self.scanned = src.len();
                return Ok(None);
            };

            let line = src.split_to(start + offset + 1);
            self.scanned = 0;
            self.consumed += line.len() as u64;

            let line = trim_line(&line);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Ok(Some(serde_json::from_slice(line).map_err(|source| {
                ParseError {
                    line_len: line.len(),
                    source,
                }
            })));
        }
    }

    // An unterminated tail at end of stream is never decoded.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if !src.is_empty() {
            warn!(
                bytes = src.len(),
                "discarding unterminated frame at end of stream"
            );
            self.consumed += src.len() as u64;
            src.clear();
            self.scanned = 0;
        }
        Ok(None)
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(&[DELIMITER]).unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
