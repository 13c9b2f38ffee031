//! [`ClientConnection`] over a `std::net::TcpStream`.
//!
//! The ESP-IDF std port exposes BSD sockets through `std::net`, so this
//! adapter is identical on device and host. Per-byte reads use the
//! socket read timeout to implement the bounded wait.

use std::io::Read;
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use log::warn;

use crate::app::ports::ClientConnection;
use crate::error::HttpError;

pub struct TcpConnection {
    stream: TcpStream,
    connected: bool,
}

impl TcpConnection {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            connected: true,
        }
    }
}

impl ClientConnection for TcpConnection {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read_byte(&mut self, timeout_ms: u32) -> Option<u8> {
        if self
            .stream
            .set_read_timeout(Some(Duration::from_millis(u64::from(timeout_ms))))
            .is_err()
        {
            self.connected = false;
            return None;
        }

        let mut buf = [0u8; 1];
        match self.stream.read(&mut buf) {
            // Zero-length read is the orderly-shutdown signal.
            Ok(0) => {
                self.connected = false;
                None
            }
            Ok(_) => Some(buf[0]),
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                None
            }
            Err(e) => {
                warn!("tcp: read error: {e}");
                self.connected = false;
                None
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        std::io::Write::write_all(&mut self.stream, bytes)
            .map_err(|_| HttpError::ResponseWriteFailed)
    }

    fn close(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
        self.connected = false;
    }
}
