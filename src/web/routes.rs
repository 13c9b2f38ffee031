//! Route dispatch for the control page.
//!
//! Three fixed routes mutate the duty cycle; everything else is a no-op
//! that still renders the page. Matching priority is `-p`, then `+p`,
//! then `PWM` — at most one mutation applies per request.

use crate::duty::{DutyCycle, HTTP_STEP_PERCENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /-p` — decrease duty by 10.
    Decrement,
    /// `GET /+p` — increase duty by 10.
    Increment,
    /// `GET /PWM` — toggle between 0 and 50.
    Toggle,
    /// Any other path, including `GET /`.
    NoOp,
}

impl Route {
    /// Classify a request from its accumulated header text.
    pub fn classify(headers: &str) -> Self {
        if headers.contains("GET /-p") {
            Self::Decrement
        } else if headers.contains("GET /+p") {
            Self::Increment
        } else if headers.contains("GET /PWM") {
            Self::Toggle
        } else {
            Self::NoOp
        }
    }

    /// Apply this route's mutation. `DutyCycle` clamps internally.
    pub fn apply(self, duty: &mut DutyCycle) {
        match self {
            Self::Decrement => duty.decrement_by(HTTP_STEP_PERCENT),
            Self::Increment => duty.increment_by(HTTP_STEP_PERCENT),
            Self::Toggle => duty.toggle(),
            Self::NoOp => {}
        }
    }
}
