//! System configuration parameters
//!
//! All tunable parameters for the bridge. Defaults match the deployed
//! conveyor installation; the access-point credentials and slave address
//! are site-specific.

use serde::{Deserialize, Serialize};

/// Core bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    // --- Access point ---
    /// Soft-AP network name broadcast by the bridge.
    pub ap_ssid: heapless::String<32>,
    /// Soft-AP WPA2 passphrase.
    pub ap_pass: heapless::String<64>,

    // --- Modbus ---
    /// Slave address of the programmable controller (CLP) on the bus.
    pub slave_id: u8,
    /// Holding register read each iteration (%MW100 on the CLP).
    pub register_address: u16,
    /// Number of registers read per poll.
    pub register_count: u16,
    /// Serial baud rate of the RS-485 link.
    pub baud_rate: u32,
    /// Deadline for a complete slave reply (milliseconds).
    pub modbus_timeout_ms: u32,

    // --- Control loop ---
    /// Fixed delay between iterations (milliseconds).
    pub loop_interval_ms: u32,
    /// Apply the polled register value to the motor output. When false
    /// the value is recorded for monitoring only and the HTTP override
    /// is the sole writer of the duty cycle.
    pub apply_remote_setpoint: bool,

    // --- HTTP ---
    /// Deadline for a client to complete its request headers
    /// (milliseconds). A stalled client is abandoned without a response.
    pub http_client_timeout_ms: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            // Access point
            ap_ssid: heapless::String::try_from("ESP32_ESTEIRA").unwrap(),
            ap_pass: heapless::String::try_from("esp32Senai").unwrap(),

            // Modbus
            slave_id: 3,
            register_address: 100,
            register_count: 1,
            baud_rate: 9_600,
            modbus_timeout_ms: 200,

            // Control loop
            loop_interval_ms: 1_000,
            apply_remote_setpoint: false,

            // HTTP
            http_client_timeout_ms: 5_000,
        }
    }
}
