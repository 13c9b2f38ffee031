//! Actuator drivers and one-shot hardware initialisation.

pub mod hw_init;
pub mod pwm;
pub mod rs485;
pub mod status_led;
