//! Application core: the control loop service and its port traits.

pub mod ports;
pub mod service;

pub use service::BridgeService;
