//! Status LED drivers.
//!
//! Two plain GPIO LEDs: the external status LED toggles once per loop
//! iteration as a heartbeat, and the on-board LED is lit for the duration
//! of each Modbus exchange as a bus-activity indicator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Heartbeat LED, toggled by the control loop.
pub struct StatusLed {
    lit: bool,
}

impl StatusLed {
    pub fn new() -> Self {
        Self { lit: false }
    }

    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    pub fn set(&mut self, lit: bool) {
        hw_init::gpio_write(pins::LED_STATUS_GPIO, lit);
        self.lit = lit;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

/// On-board LED, lit while a Modbus transaction is in flight.
pub struct ActivityLed {
    lit: bool,
}

impl ActivityLed {
    pub fn new() -> Self {
        Self { lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        hw_init::gpio_write(pins::LED_BUILTIN_GPIO, lit);
        self.lit = lit;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_led_toggles() {
        let mut led = StatusLed::new();
        assert!(!led.is_lit());
        led.toggle();
        assert!(led.is_lit());
        led.toggle();
        assert!(!led.is_lit());
    }
}
