//! Port traits — the boundary between the control logic and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! The UART and TCP adapters implement these traits on hardware; the
//! integration tests implement them with scripted byte streams. The
//! service consumes them via generics and never touches a peripheral
//! directly.

use crate::error::HttpError;

// ───────────────────────────────────────────────────────────────
// Serial link (Modbus side)
// ───────────────────────────────────────────────────────────────

/// Byte-level access to the RS-485 serial line.
///
/// The link is half-duplex from the caller's perspective: a request is
/// written and flushed in full before any reply byte is read.
pub trait SerialLink {
    /// Queue `bytes` for transmission.
    fn write_all(&mut self, bytes: &[u8]);

    /// Block until every queued byte has drained onto the wire.
    ///
    /// The RS-485 direction line is released only after this returns.
    fn flush_tx(&mut self);

    /// Drop any stale bytes in the receive buffer.
    fn discard_input(&mut self);

    /// Read one byte, waiting at most `timeout_ms`. `None` on timeout.
    fn read_byte(&mut self, timeout_ms: u32) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Client connection (HTTP side)
// ───────────────────────────────────────────────────────────────

/// One accepted HTTP client connection.
pub trait ClientConnection {
    /// Whether the peer is still connected.
    fn is_connected(&self) -> bool;

    /// Read one byte, waiting at most `timeout_ms`. `None` means no data
    /// arrived in that window (or the peer went away — check
    /// [`is_connected`](Self::is_connected)).
    fn read_byte(&mut self, timeout_ms: u32) -> Option<u8>;

    /// Write the whole response buffer.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), HttpError>;

    /// Close the connection from the server side.
    fn close(&mut self);
}
