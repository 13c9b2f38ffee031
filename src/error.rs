//! Unified error types for the bridge firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be cheaply passed back through the loop without allocation.

use core::fmt;

use crate::modbus::ModbusError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A Modbus transaction failed (timeout, framing, or slave exception).
    Modbus(ModbusError),
    /// The HTTP control surface failed to service a client.
    Http(HttpError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modbus(e) => write!(f, "modbus: {e}"),
            Self::Http(e) => write!(f, "http: {e}"),
        }
    }
}

impl From<ModbusError> for Error {
    fn from(e: ModbusError) -> Self {
        Self::Modbus(e)
    }
}

// ---------------------------------------------------------------------------
// HTTP errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    /// Client disconnected before completing its request headers.
    ClientDisconnected,
    /// Client held the connection open past the per-connection deadline.
    ClientStalled,
    /// Writing the response to the socket failed.
    ResponseWriteFailed,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientDisconnected => write!(f, "client disconnected mid-request"),
            Self::ClientStalled => write!(f, "client stalled past deadline"),
            Self::ResponseWriteFailed => write!(f, "response write failed"),
        }
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
