//! Integration tests for the full control-loop path: Modbus poll, HTTP
//! override, and actuator writes through the real service with scripted
//! adapters.

use crate::mock_hw::{MockConnection, MockSerial};

use pwmbridge::app::service::BridgeService;
use pwmbridge::config::BridgeConfig;
use pwmbridge::drivers::pwm::PwmActuator;
use pwmbridge::modbus::{ExceptionCode, ModbusError};
use pwmbridge::web::Route;
use pwmbridge::{Error, HttpError};

fn make_bridge() -> (BridgeService, PwmActuator) {
    make_bridge_with(BridgeConfig::default())
}

fn make_bridge_with(config: BridgeConfig) -> (BridgeService, PwmActuator) {
    let mut service = BridgeService::new(config);
    let mut pwm = PwmActuator::new();
    service.startup(&mut pwm);
    (service, pwm)
}

/// Config with a client deadline short enough for tests that must run
/// into it.
fn short_deadline_config() -> BridgeConfig {
    BridgeConfig {
        http_client_timeout_ms: 20,
        ..BridgeConfig::default()
    }
}

// ── HTTP override path ────────────────────────────────────────

#[test]
fn decrement_request_from_50_yields_40_and_counter_102() {
    let (mut service, mut pwm) = make_bridge();
    assert_eq!(service.duty().percent(), 50);

    let mut conn = MockConnection::with_request("GET /-p HTTP/1.1\r\nHost: x\r\n\r\n");
    let route = service.service_client(&mut conn, &mut pwm).unwrap();

    assert_eq!(route, Route::Decrement);
    assert_eq!(service.duty().percent(), 40);
    assert_eq!(pwm.current_counts(), 102, "round(40*255/100)");
    assert!(conn.response_text().contains("PWM(40)"));
    assert!(conn.closed, "server closes after responding");
}

#[test]
fn pwm_toggle_is_idempotent_pairwise() {
    let (mut service, mut pwm) = make_bridge();

    // Drive the duty to 0 first.
    let mut conn = MockConnection::with_request("GET /PWM HTTP/1.1\r\n\r\n");
    service.service_client(&mut conn, &mut pwm).unwrap();
    assert_eq!(service.duty().percent(), 0);

    // 0 → 50 → 0: a pure toggle, not monotonic.
    let mut conn = MockConnection::with_request("GET /PWM HTTP/1.1\r\n\r\n");
    service.service_client(&mut conn, &mut pwm).unwrap();
    assert_eq!(service.duty().percent(), 50);

    let mut conn = MockConnection::with_request("GET /PWM HTTP/1.1\r\n\r\n");
    service.service_client(&mut conn, &mut pwm).unwrap();
    assert_eq!(service.duty().percent(), 0);
}

#[test]
fn increment_clamps_at_100() {
    let (mut service, mut pwm) = make_bridge();

    // 50 → 60 → ... → 100, then two more stay clamped.
    for _ in 0..7 {
        let mut conn = MockConnection::with_request("GET /+p HTTP/1.1\r\n\r\n");
        service.service_client(&mut conn, &mut pwm).unwrap();
    }
    assert_eq!(service.duty().percent(), 100);
    assert_eq!(pwm.current_counts(), 255);
}

#[test]
fn route_priority_prefers_decrement() {
    let (mut service, mut pwm) = make_bridge();

    // Pathological request whose headers contain all three substrings.
    let mut conn = MockConnection::with_request(
        "GET /-p HTTP/1.1\r\nReferer: GET /+p\r\nX-Prev: GET /PWM\r\n\r\n",
    );
    let route = service.service_client(&mut conn, &mut pwm).unwrap();

    assert_eq!(route, Route::Decrement);
    assert_eq!(service.duty().percent(), 40, "only the decrement applied");
}

#[test]
fn unknown_path_still_gets_the_page_with_unchanged_duty() {
    let (mut service, mut pwm) = make_bridge();

    let mut conn = MockConnection::with_request("GET / HTTP/1.1\r\nHost: x\r\n\r\n");
    let route = service.service_client(&mut conn, &mut pwm).unwrap();

    assert_eq!(route, Route::NoOp);
    assert_eq!(service.duty().percent(), 50);
    let response = conn.response_text();
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("PWM(50)"));
}

#[test]
fn stalled_client_is_abandoned_without_mutating_duty() {
    let (mut service, mut pwm) = make_bridge_with(short_deadline_config());
    let counts_before = pwm.current_counts();

    // Headers never terminated; the client goes silent mid-request.
    let mut conn = MockConnection::stalled_after("GET /-p HTTP/1.1\r\nHost: x\r\n");
    let result = service.service_client(&mut conn, &mut pwm);

    assert_eq!(result, Err(Error::Http(HttpError::ClientStalled)));
    assert!(conn.closed);
    assert!(conn.written.is_empty(), "no response for an abandoned client");
    assert_eq!(service.duty().percent(), 50);
    assert_eq!(pwm.current_counts(), counts_before);
}

#[test]
fn trickling_client_is_abandoned_at_the_deadline() {
    let (mut service, mut pwm) = make_bridge_with(short_deadline_config());

    // The client keeps sending header bytes and never the blank line. Byte
    // arrivals must not extend the deadline, or one slow client could hold
    // the loop off the Modbus poll forever.
    let mut conn = MockConnection::trickling_after("GET /-p HTTP/1.1\r\n");
    let result = service.service_client(&mut conn, &mut pwm);

    assert_eq!(result, Err(Error::Http(HttpError::ClientStalled)));
    assert!(conn.closed);
    assert!(conn.written.is_empty(), "no response for an abandoned client");
    assert_eq!(service.duty().percent(), 50);
}

// ── Modbus poll path ──────────────────────────────────────────

#[test]
fn successful_poll_is_monitoring_only_by_default() {
    let (mut service, mut pwm) = make_bridge();
    let mut serial = MockSerial::new();
    serial.queue_register_reply(3, 72);

    let value = service.poll_controller(&mut serial, &mut pwm).unwrap();

    assert_eq!(value, 72);
    assert_eq!(service.last_controller_value(), Some(72));
    // Default wiring: the polled value is recorded, not applied.
    assert_eq!(service.duty().percent(), 50);
    assert_eq!(pwm.current_percent(), 50);
}

#[test]
fn poll_request_frame_targets_register_100() {
    let (mut service, mut pwm) = make_bridge();
    let mut serial = MockSerial::new();
    serial.queue_register_reply(3, 1);

    service.poll_controller(&mut serial, &mut pwm).unwrap();

    let req = &serial.requests[0];
    assert_eq!(req.len(), 8);
    assert_eq!(req[0], 3, "slave id");
    assert_eq!(req[1], 0x03, "read holding registers");
    assert_eq!(u16::from_be_bytes([req[2], req[3]]), 100);
    assert_eq!(u16::from_be_bytes([req[4], req[5]]), 1);
}

#[test]
fn timeout_leaves_duty_untouched() {
    let (mut service, mut pwm) = make_bridge();
    let mut serial = MockSerial::new();
    serial.queue_silence();

    let result = service.poll_controller(&mut serial, &mut pwm);

    assert_eq!(result, Err(Error::Modbus(ModbusError::Timeout)));
    assert_eq!(service.duty().percent(), 50);
    assert_eq!(service.last_controller_value(), None);
}

#[test]
fn illegal_data_address_is_reported_and_nonfatal() {
    let (mut service, mut pwm) = make_bridge();
    let counts_before = pwm.current_counts();
    let mut serial = MockSerial::new();
    serial.queue_exception_reply(3, 0x02);

    let result = service.poll_controller(&mut serial, &mut pwm);

    assert_eq!(
        result,
        Err(Error::Modbus(ModbusError::Exception(
            ExceptionCode::IllegalDataAddress
        )))
    );
    assert_eq!(pwm.current_counts(), counts_before, "no PWM write on failure");
    assert_eq!(service.duty().percent(), 50);

    // The loop proceeds: a later good reply is accepted normally.
    serial.queue_register_reply(3, 9);
    assert_eq!(service.poll_controller(&mut serial, &mut pwm), Ok(9));
}

#[test]
fn remote_setpoint_drives_the_actuator_when_enabled() {
    let mut config = BridgeConfig::default();
    config.apply_remote_setpoint = true;
    let mut service = BridgeService::new(config);
    let mut pwm = PwmActuator::new();
    service.startup(&mut pwm);

    let mut serial = MockSerial::new();
    serial.queue_register_reply(3, 80);
    service.poll_controller(&mut serial, &mut pwm).unwrap();

    assert_eq!(service.duty().percent(), 80);
    assert_eq!(pwm.current_percent(), 80);

    // Out-of-range register values clamp like every other mutation.
    serial.queue_register_reply(3, 400);
    service.poll_controller(&mut serial, &mut pwm).unwrap();
    assert_eq!(service.duty().percent(), 100);
}

// ── Interleaving ──────────────────────────────────────────────

#[test]
fn poll_failure_then_http_override_sequence() {
    // One full iteration's worth of both paths: a failed poll must not
    // disturb the override that follows it.
    let (mut service, mut pwm) = make_bridge();
    let mut serial = MockSerial::new();
    serial.queue_silence();

    let _ = service.poll_controller(&mut serial, &mut pwm);
    service.toggle_status();
    assert!(service.status_led_lit());

    let mut conn = MockConnection::with_request("GET /+p HTTP/1.1\r\n\r\n");
    service.service_client(&mut conn, &mut pwm).unwrap();

    assert_eq!(service.duty().percent(), 60);
    assert_eq!(pwm.current_percent(), 60);
}
