//! Bridge service — owner of the one authoritative duty-cycle value.
//!
//! Runs the fixed per-iteration sequence: Modbus poll, optional setpoint
//! application, status toggle; then (after the loop delay, driven from
//! `main`) HTTP client service. Strictly sequential — only one of the two
//! duty-cycle writers runs per iteration, so no locking is needed.

use log::{info, warn};

use crate::app::ports::{ClientConnection, SerialLink};
use crate::config::BridgeConfig;
use crate::drivers::pwm::PwmActuator;
use crate::drivers::rs485::Rs485Transceiver;
use crate::drivers::status_led::{ActivityLed, StatusLed};
use crate::duty::DutyCycle;
use crate::error::Result;
use crate::modbus::ModbusClient;
use crate::web::{HttpControlServer, Route};

/// Duty applied at startup, before the first override arrives.
const INITIAL_DUTY_PERCENT: u8 = 50;

pub struct BridgeService {
    config: BridgeConfig,
    duty: DutyCycle,
    modbus: ModbusClient,
    http: HttpControlServer,
    rs485: Rs485Transceiver,
    status_led: StatusLed,
    activity_led: ActivityLed,
    /// Most recent value read from the controller, kept for monitoring
    /// even when `apply_remote_setpoint` is off.
    last_controller_value: Option<u16>,
}

impl BridgeService {
    pub fn new(config: BridgeConfig) -> Self {
        let modbus = ModbusClient::new(config.slave_id, config.modbus_timeout_ms);
        let http = HttpControlServer::new(config.http_client_timeout_ms);
        Self {
            config,
            duty: DutyCycle::new(INITIAL_DUTY_PERCENT),
            modbus,
            http,
            rs485: Rs485Transceiver::new(),
            status_led: StatusLed::new(),
            activity_led: ActivityLed::new(),
            last_controller_value: None,
        }
    }

    /// Write the startup duty to the actuator. Call once before the loop.
    pub fn startup(&mut self, pwm: &mut PwmActuator) {
        pwm.set_duty(self.duty);
        info!("bridge: motor started at {}%", self.duty.percent());
    }

    // ── Iteration step 1: Modbus poll ─────────────────────────

    /// Poll the controller's duty register once.
    ///
    /// On success the value is retained for monitoring and, only when
    /// configured, applied to the duty cycle and the actuator. On failure
    /// the error is logged and the prior duty cycle persists — the next
    /// iteration simply polls again.
    pub fn poll_controller(
        &mut self,
        link: &mut impl SerialLink,
        pwm: &mut PwmActuator,
    ) -> Result<u16> {
        self.activity_led.set(true);
        let result = self.modbus.read_holding_registers(
            link,
            &mut self.rs485,
            self.config.register_address,
            self.config.register_count,
        );
        self.activity_led.set(false);

        match result {
            Ok(value) => {
                self.last_controller_value = Some(value);
                if self.config.apply_remote_setpoint {
                    self.duty.set(value.min(100) as u8);
                    pwm.set_duty(self.duty);
                    info!("bridge: controller setpoint {} -> duty {}%", value, self.duty.percent());
                } else {
                    info!("bridge: controller reports {}", value);
                }
            }
            Err(e) => {
                warn!("bridge: register read failed: {e}");
            }
        }
        Ok(result?)
    }

    // ── Iteration step 2: status indicator ────────────────────

    pub fn toggle_status(&mut self) {
        self.status_led.toggle();
    }

    // ── Iteration step 4: HTTP client service ─────────────────

    /// Service one waiting HTTP client to completion.
    pub fn service_client(
        &mut self,
        conn: &mut impl ClientConnection,
        pwm: &mut PwmActuator,
    ) -> Result<Route> {
        Ok(self.http.serve(conn, &mut self.duty, pwm)?)
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn duty(&self) -> DutyCycle {
        self.duty
    }

    pub fn last_controller_value(&self) -> Option<u16> {
        self.last_controller_value
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn status_led_lit(&self) -> bool {
        self.status_led.is_lit()
    }
}
