//! Motor PWM actuator (LEDC channel 0).
//!
//! Converts a duty-cycle percentage into the 8-bit LEDC counter range and
//! writes it. Writes are fire-and-forget — the peripheral gives no
//! acknowledgment.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the real LEDC duty register via hw_init.
//! On host/test: tracks the last write in-memory only.

use crate::drivers::hw_init;
use crate::duty::DutyCycle;

pub struct PwmActuator {
    last_percent: u8,
    last_counts: u32,
}

impl PwmActuator {
    pub fn new() -> Self {
        Self {
            last_percent: 0,
            last_counts: 0,
        }
    }

    /// Write `duty` to the motor PWM channel.
    ///
    /// The caller has already clamped; `DutyCycle` cannot hold an
    /// out-of-range percentage, so no further check is needed here.
    pub fn set_duty(&mut self, duty: DutyCycle) {
        let counts = duty.counts();
        hw_init::ledc_set(hw_init::LEDC_CH_MOTOR, counts);
        self.last_percent = duty.percent();
        self.last_counts = counts;
    }

    /// Stop the motor (0% duty).
    pub fn off(&mut self) {
        self.set_duty(DutyCycle::new(0));
    }

    pub fn current_percent(&self) -> u8 {
        self.last_percent
    }

    /// Last counter value written to the LEDC duty register.
    pub fn current_counts(&self) -> u32 {
        self.last_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_duty_records_counter_write() {
        let mut pwm = PwmActuator::new();
        pwm.set_duty(DutyCycle::new(40));
        assert_eq!(pwm.current_percent(), 40);
        assert_eq!(pwm.current_counts(), 102);
    }

    #[test]
    fn off_zeroes_the_counter() {
        let mut pwm = PwmActuator::new();
        pwm.set_duty(DutyCycle::new(75));
        pwm.off();
        assert_eq!(pwm.current_percent(), 0);
        assert_eq!(pwm.current_counts(), 0);
    }

    #[test]
    fn full_scale_hits_max_counts() {
        let mut pwm = PwmActuator::new();
        pwm.set_duty(DutyCycle::new(100));
        assert_eq!(pwm.current_counts(), 255);
    }
}
