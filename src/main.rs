//! PwmBridge firmware — main entry point.
//!
//! One cooperative control loop interleaves three timing-sensitive
//! interfaces, strictly in sequence and without threads:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ per iteration:                                               │
//! │   1. Modbus RTU poll of the CLP duty register (RS-485)       │
//! │   2. status LED toggle                                       │
//! │   3. fixed 1 s delay                                         │
//! │   4. service one waiting HTTP client, if any                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! While the Modbus transaction or an HTTP exchange is in flight nothing
//! else runs; the HTTP read is deadline-bounded so a stalled client
//! cannot starve polling indefinitely.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod duty;
mod error;
mod pins;

pub mod app;
mod adapters;
mod drivers;
pub mod modbus;
pub mod web;

// ── Imports ───────────────────────────────────────────────────
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use adapters::tcp::TcpConnection;
use adapters::uart_link::UartLink;
use adapters::wifi::AccessPoint;
use app::service::BridgeService;
use config::BridgeConfig;
use drivers::pwm::PwmActuator;

const HTTP_PORT: u16 = 80;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PwmBridge v{} — Modbus/PWM interface", env!("CARGO_PKG_VERSION"));

    let config = BridgeConfig::default();

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals(config.baud_rate) {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Soft AP + listener ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    let _ap = {
        let peripherals = esp_idf_svc::hal::peripherals::Peripherals::take()?;
        AccessPoint::start(peripherals.modem, &config.ap_ssid, &config.ap_pass)?
    };
    #[cfg(not(target_os = "espidf"))]
    let _ap = AccessPoint::start(&config.ap_ssid, &config.ap_pass)?;

    let listener = TcpListener::bind(("0.0.0.0", HTTP_PORT))
        .with_context(|| format!("binding control server on port {HTTP_PORT}"))?;
    listener
        .set_nonblocking(true)
        .context("setting listener non-blocking")?;
    info!("http: control server listening on port {}", HTTP_PORT);

    // ── 4. Service construction ───────────────────────────────
    let loop_interval = Duration::from_millis(u64::from(config.loop_interval_ms));
    let mut uart = UartLink::new();
    let mut pwm = PwmActuator::new();
    let mut service = BridgeService::new(config);
    service.startup(&mut pwm);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        // 5.1 Modbus poll — errors are logged inside and non-fatal.
        let _ = service.poll_controller(&mut uart, &mut pwm);

        // 5.2 Heartbeat.
        service.toggle_status();

        // 5.3 The loop's only unconditional suspension point.
        thread::sleep(loop_interval);

        // 5.4 Service one waiting HTTP client, if any.
        match listener.accept() {
            Ok((stream, peer)) => {
                info!("http: client connected from {}", peer);
                let mut conn = TcpConnection::new(stream);
                match service.service_client(&mut conn, &mut pwm) {
                    Ok(route) => info!(
                        "http: served {:?}, duty now {}%",
                        route,
                        service.duty().percent()
                    ),
                    // Already logged at the point of failure; duty unchanged.
                    Err(_) => {}
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
            Err(e) => warn!("http: accept failed: {e}"),
        }
    }
}
