//! Hardware adapters implementing the port traits.

pub mod tcp;
pub mod uart_link;
pub mod wifi;
