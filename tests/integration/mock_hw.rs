//! Mock adapters for integration tests.
//!
//! Scripted implementations of the port traits so the full control loop
//! path can run on the host without UART or sockets.

use pwmbridge::app::ports::{ClientConnection, SerialLink};
use pwmbridge::modbus::frame::crc16;
use pwmbridge::HttpError;
use std::collections::VecDeque;

// ── Scripted serial link ──────────────────────────────────────

/// Plays back one canned reply per transaction and records every request
/// frame written to the bus.
pub struct MockSerial {
    pub requests: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    current: VecDeque<u8>,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            replies: VecDeque::new(),
            current: VecDeque::new(),
        }
    }

    /// Queue a raw reply frame for the next transaction.
    pub fn queue_reply(&mut self, frame: Vec<u8>) {
        self.replies.push_back(frame);
    }

    /// Queue a well-formed single-register reply from `slave` with `value`.
    pub fn queue_register_reply(&mut self, slave: u8, value: u16) {
        let v = value.to_be_bytes();
        let payload = [slave, 0x03, 0x02, v[0], v[1]];
        let mut frame = payload.to_vec();
        frame.extend_from_slice(&crc16(&payload).to_le_bytes());
        self.replies.push_back(frame);
    }

    /// Queue an exception reply from `slave` with the given exception code.
    pub fn queue_exception_reply(&mut self, slave: u8, code: u8) {
        let payload = [slave, 0x83, code];
        let mut frame = payload.to_vec();
        frame.extend_from_slice(&crc16(&payload).to_le_bytes());
        self.replies.push_back(frame);
    }

    /// Queue a silent transaction (the slave never answers).
    pub fn queue_silence(&mut self) {
        self.replies.push_back(Vec::new());
    }
}

impl SerialLink for MockSerial {
    fn write_all(&mut self, bytes: &[u8]) {
        self.requests.push(bytes.to_vec());
        // A new request consumes the next scripted reply.
        self.current = self.replies.pop_front().unwrap_or_default().into();
    }

    fn flush_tx(&mut self) {}

    fn discard_input(&mut self) {
        self.current.clear();
    }

    fn read_byte(&mut self, _timeout_ms: u32) -> Option<u8> {
        self.current.pop_front()
    }
}

// ── Scripted HTTP connection ──────────────────────────────────

/// Feeds a canned request byte stream and records the response.
pub struct MockConnection {
    incoming: VecDeque<u8>,
    filler: Option<u8>,
    pub written: Vec<u8>,
    pub closed: bool,
    connected: bool,
}

#[allow(dead_code)]
impl MockConnection {
    pub fn with_request(request: &str) -> Self {
        Self {
            incoming: request.bytes().collect(),
            filler: None,
            written: Vec::new(),
            closed: false,
            connected: true,
        }
    }

    /// A client that sends `partial` and then goes silent without ever
    /// completing its headers.
    pub fn stalled_after(partial: &str) -> Self {
        Self::with_request(partial)
    }

    /// A client that sends `partial` and then keeps emitting header bytes
    /// forever, never the blank-line terminator.
    pub fn trickling_after(partial: &str) -> Self {
        let mut conn = Self::with_request(partial);
        conn.filler = Some(b'x');
        conn
    }

    pub fn response_text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl ClientConnection for MockConnection {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read_byte(&mut self, _timeout_ms: u32) -> Option<u8> {
        self.incoming.pop_front().or(self.filler)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        self.connected = false;
    }
}
