//! Per-connection HTTP exchange.
//!
//! Connection lifecycle: accepted → reading request lines byte-by-byte →
//! responding → closed. The read phase blocks the whole control loop, so
//! it is bounded by a per-connection deadline: a client that never
//! finishes its headers is abandoned without a response rather than
//! starving the Modbus poll forever.

use std::time::{Duration, Instant};

use log::{info, warn};

use crate::app::ports::ClientConnection;
use crate::drivers::pwm::PwmActuator;
use crate::duty::DutyCycle;
use crate::error::HttpError;
use crate::web::page;
use crate::web::parser::RequestAccumulator;
use crate::web::routes::Route;

/// Granularity of the read loop. Small enough that disconnects are
/// noticed promptly, large enough not to spin.
const READ_SLICE_MS: u32 = 50;

pub struct HttpControlServer {
    client_timeout_ms: u32,
}

impl HttpControlServer {
    pub fn new(client_timeout_ms: u32) -> Self {
        Self { client_timeout_ms }
    }

    /// Service one accepted client to completion: parse, apply at most one
    /// duty mutation, write the actuator, respond, close.
    ///
    /// Returns the route that was applied. On error the connection is
    /// closed and the duty cycle is left untouched.
    pub fn serve(
        &self,
        conn: &mut impl ClientConnection,
        duty: &mut DutyCycle,
        pwm: &mut PwmActuator,
    ) -> Result<Route, HttpError> {
        match self.read_request(conn) {
            Ok(acc) => {
                let route = Route::classify(acc.headers());
                route.apply(duty);
                pwm.set_duty(*duty);
                info!("http: {:?} -> duty {}%", route, duty.percent());

                let response = page::render_response(*duty);
                let wrote = conn.write_all(response.as_bytes());
                conn.close();
                wrote.map(|()| route)
            }
            Err(e) => {
                warn!("http: abandoning client ({e})");
                conn.close();
                Err(e)
            }
        }
    }

    /// Byte-at-a-time read until the blank-line terminator. The deadline is
    /// taken from the wall clock at connection start: a client that has not
    /// completed its headers by then is abandoned, whether it went silent
    /// or keeps trickling bytes.
    fn read_request(
        &self,
        conn: &mut impl ClientConnection,
    ) -> Result<RequestAccumulator, HttpError> {
        let mut acc = RequestAccumulator::new();
        let deadline =
            Instant::now() + Duration::from_millis(u64::from(self.client_timeout_ms));

        loop {
            if !conn.is_connected() {
                return Err(HttpError::ClientDisconnected);
            }
            if Instant::now() >= deadline {
                return Err(HttpError::ClientStalled);
            }
            if let Some(byte) = conn.read_byte(READ_SLICE_MS) {
                if acc.push(byte) {
                    return Ok(acc);
                }
            }
        }
    }
}
