//! GPIO / peripheral pin assignments for the bridge board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Motor PWM output
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the motor speed controller.
pub const MOTOR_PWM_GPIO: i32 = 15;

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Maximum LEDC counter value at [`PWM_RESOLUTION_BITS`] resolution.
pub const PWM_MAX_COUNTS: u32 = (1 << PWM_RESOLUTION_BITS) - 1;
/// LEDC base frequency for the motor output.
pub const MOTOR_PWM_FREQ_HZ: u32 = 100;

// ---------------------------------------------------------------------------
// Status LEDs
// ---------------------------------------------------------------------------

/// External status LED, toggled once per control-loop iteration.
pub const LED_STATUS_GPIO: i32 = 4;
/// On-board activity LED, lit for the duration of each Modbus exchange.
pub const LED_BUILTIN_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// RS-485 transceiver (MAX485)
// ---------------------------------------------------------------------------

/// Driver-enable line. HIGH = drive the bus, LOW = listen.
pub const MAX485_DE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// UART — Modbus RTU serial link
// ---------------------------------------------------------------------------

/// UART port number used for the RS-485 bus (UART2 on ESP32).
pub const MODBUS_UART_NUM: u32 = 2;
pub const MODBUS_UART_TX_GPIO: i32 = 17;
pub const MODBUS_UART_RX_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// UART — debug console
// ---------------------------------------------------------------------------

pub const CONSOLE_BAUD: u32 = 9_600;
