//! Motor duty cycle — the one authoritative value in the system.
//!
//! Every interface (Modbus poll, HTTP override, PWM write) observes and
//! mutates this single value; there is no per-interface shadow copy.
//! Every mutation clamps to 0–100, so a `DutyCycle` can never hold an
//! out-of-range percentage.

use crate::pins::PWM_MAX_COUNTS;

/// Step applied by the HTTP `+p` / `-p` routes.
pub const HTTP_STEP_PERCENT: u8 = 10;
/// Duty selected by the HTTP toggle route when starting from zero.
pub const TOGGLE_ON_PERCENT: u8 = 50;

/// Integer duty-cycle percentage, invariant `0 ≤ value ≤ 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyCycle(u8);

impl DutyCycle {
    /// Construct, clamping to 100.
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Replace the value, clamping to 100.
    pub fn set(&mut self, percent: u8) {
        self.0 = percent.min(100);
    }

    /// Increase by `step`, saturating at 100.
    pub fn increment_by(&mut self, step: u8) {
        self.0 = self.0.saturating_add(step).min(100);
    }

    /// Decrease by `step`, saturating at 0.
    pub fn decrement_by(&mut self, step: u8) {
        self.0 = self.0.saturating_sub(step);
    }

    /// Pure toggle: nonzero → 0, zero → [`TOGGLE_ON_PERCENT`].
    pub fn toggle(&mut self) {
        self.0 = if self.0 > 0 { 0 } else { TOGGLE_ON_PERCENT };
    }

    /// Convert to the LEDC counter value: `round(percent * 255 / 100)`.
    pub fn counts(self) -> u32 {
        (u32::from(self.0) * PWM_MAX_COUNTS + 50) / 100
    }
}

impl Default for DutyCycle {
    fn default() -> Self {
        Self(0)
    }
}

impl core::fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
