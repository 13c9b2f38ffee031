//! Incremental HTTP request-header accumulator.
//!
//! Fed one byte at a time while the client trickles its request in.
//! Carriage returns are dropped; a line feed on an empty line marks the
//! blank-line end of the headers. Two buffers accumulate in parallel: the
//! current line (reset on every line feed) and the aggregate header text
//! used for route matching.

/// Capacity of the current-line buffer. Request lines for the three fixed
/// routes are a dozen bytes; anything longer is silently truncated.
const LINE_CAP: usize = 128;
/// Capacity of the aggregate header buffer. The route substring sits in
/// the first line, so overflow from a bloated client only costs matching
/// on headers nobody inspects.
const HEADER_CAP: usize = 512;

/// Byte-at-a-time header parser for one connection.
pub struct RequestAccumulator {
    line: heapless::String<LINE_CAP>,
    header: heapless::String<HEADER_CAP>,
    complete: bool,
}

impl RequestAccumulator {
    pub fn new() -> Self {
        Self {
            line: heapless::String::new(),
            header: heapless::String::new(),
            complete: false,
        }
    }

    /// Feed one byte. Returns `true` once the blank-line terminator has
    /// been seen; further bytes are ignored after that.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.complete {
            return true;
        }
        match byte {
            b'\r' => {}
            b'\n' => {
                if self.line.is_empty() {
                    self.complete = true;
                } else {
                    self.line.clear();
                }
            }
            other => {
                // Overflow drops the byte; route matching only needs the
                // front of the request.
                let _ = self.line.push(other as char);
                let _ = self.header.push(other as char);
            }
        }
        self.complete
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The accumulated header text (CR/LF stripped).
    pub fn headers(&self) -> &str {
        &self.header
    }
}

impl Default for RequestAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
