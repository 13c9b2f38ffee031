//! [`SerialLink`] over the RS-485 UART driver.
//!
//! Thin adapter over the hw_init UART helpers. On host targets those are
//! no-op stubs (reads always time out), so this type compiles everywhere
//! while real byte traffic only happens on ESP-IDF.

use crate::app::ports::SerialLink;
use crate::drivers::hw_init;

/// An 8-byte request at 9600 baud takes ~8 ms to drain; this is a hard
/// upper bound on the wait before the bus is released.
const TX_DRAIN_TIMEOUT_MS: u32 = 50;

pub struct UartLink;

impl UartLink {
    pub fn new() -> Self {
        Self
    }
}

impl SerialLink for UartLink {
    fn write_all(&mut self, bytes: &[u8]) {
        hw_init::uart_write(bytes);
    }

    fn flush_tx(&mut self) {
        hw_init::uart_wait_tx_done(TX_DRAIN_TIMEOUT_MS);
    }

    fn discard_input(&mut self) {
        hw_init::uart_flush_input();
    }

    fn read_byte(&mut self, timeout_ms: u32) -> Option<u8> {
        hw_init::uart_read_byte(timeout_ms)
    }
}
