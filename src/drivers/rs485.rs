//! MAX485 half-duplex transceiver driver.
//!
//! The RS-485 bus shares one pair for both directions, so the driver-enable
//! (DE) line must bracket every transmission: drive mode immediately before
//! the request frame is written, listen mode immediately after the last
//! byte has drained — never on a fixed delay. Releasing too early truncates
//! our own frame; releasing too late swallows the start of the slave reply.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: toggles the real DE GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDirection {
    Transmit,
    Receive,
}

pub struct Rs485Transceiver {
    direction: BusDirection,
}

impl Rs485Transceiver {
    pub fn new() -> Self {
        // DE idles low: the transceiver listens until a transaction starts.
        hw_init::gpio_write(pins::MAX485_DE_GPIO, false);
        Self {
            direction: BusDirection::Receive,
        }
    }

    /// Switch the transceiver to drive mode. Call immediately before
    /// writing a request frame.
    pub fn before_transmit(&mut self) {
        hw_init::gpio_write(pins::MAX485_DE_GPIO, true);
        self.direction = BusDirection::Transmit;
    }

    /// Return the transceiver to listen mode. Call immediately after the
    /// last byte of the request has drained from the TX FIFO.
    pub fn after_transmit(&mut self) {
        hw_init::gpio_write(pins::MAX485_DE_GPIO, false);
        self.direction = BusDirection::Receive;
    }

    pub fn direction(&self) -> BusDirection {
        self.direction
    }
}
