//! Modbus RTU master, reduced to the one transaction this bridge needs:
//! Read Holding Registers (function 0x03) against a fixed slave.

pub mod client;
pub mod frame;

pub use client::ModbusClient;
pub use frame::{ExceptionCode, ModbusError};
