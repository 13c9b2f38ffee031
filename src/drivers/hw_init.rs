//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the LEDC PWM timer/channel, and the
//! RS-485 UART using raw ESP-IDF sys calls. Called once from `main()`
//! before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed,
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed => write!(f, "LEDC timer/channel config failed"),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// LEDC channel driving the motor PWM output.
pub const LEDC_CH_MOTOR: u32 = 0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(baud_rate: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_ledc();
        init_uart(baud_rate)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_baud_rate: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::LED_STATUS_GPIO,
        pins::LED_BUILTIN_GPIO,
        pins::MAX485_DE_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (status LED, builtin LED, MAX485 DE)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() {
    // Timer 0: motor PWM (100 Hz, 8-bit).
    // SAFETY: Called from the single main-task context via init_peripherals().
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::MOTOR_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    unsafe {
        ledc_timer_config(&timer0);
    }

    unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::MOTOR_PWM_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        });
    }

    info!("hw_init: LEDC configured (motor=CH0, {} Hz, 8-bit)", pins::MOTOR_PWM_FREQ_HZ);
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty_counts: u32) {
    // SAFETY: The LEDC channel was configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty_counts);
        esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty_counts: u32) {}

// ── UART (RS-485 bus) ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF_BYTES: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud_rate: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud_rate as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    let port = pins::MODBUS_UART_NUM as i32;
    // SAFETY: one-shot driver install on an unused UART port.
    unsafe {
        let ret = uart_param_config(port, &cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_set_pin(
            port,
            pins::MODBUS_UART_TX_GPIO,
            pins::MODBUS_UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_driver_install(port, UART_RX_BUF_BYTES, 0, 0, core::ptr::null_mut(), 0);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }

    info!("hw_init: UART{} configured at {} baud (RS-485 bus)", port, baud_rate);
    Ok(())
}

/// Queue `bytes` for transmission on the RS-485 UART.
#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) {
    // SAFETY: driver installed in init_uart(); uart_write_bytes copies the
    // buffer into the driver's TX ring before returning.
    unsafe {
        uart_write_bytes(
            pins::MODBUS_UART_NUM as i32,
            bytes.as_ptr().cast(),
            bytes.len(),
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_bytes: &[u8]) {}

/// Block until the TX FIFO has fully drained onto the wire.
///
/// The MAX485 direction line must stay in drive mode until this returns,
/// or the tail of the request frame is truncated.
#[cfg(target_os = "espidf")]
pub fn uart_wait_tx_done(timeout_ms: u32) {
    // SAFETY: driver installed in init_uart().
    unsafe {
        esp_idf_svc::sys::uart_wait_tx_done(pins::MODBUS_UART_NUM as i32, ms_to_ticks(timeout_ms));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_wait_tx_done(_timeout_ms: u32) {}

/// Read a single byte from the RS-485 UART, waiting at most `timeout_ms`.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte(timeout_ms: u32) -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: driver installed in init_uart(); uart_read_bytes copies at
    // most one byte into the local buffer.
    let n = unsafe {
        uart_read_bytes(
            pins::MODBUS_UART_NUM as i32,
            (&raw mut byte).cast(),
            1,
            ms_to_ticks(timeout_ms),
        )
    };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte(_timeout_ms: u32) -> Option<u8> {
    None
}

/// Discard any stale bytes sitting in the RX ring before a new transaction.
#[cfg(target_os = "espidf")]
pub fn uart_flush_input() {
    // SAFETY: driver installed in init_uart().
    unsafe {
        esp_idf_svc::sys::uart_flush_input(pins::MODBUS_UART_NUM as i32);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_flush_input() {}

#[cfg(target_os = "espidf")]
fn ms_to_ticks(ms: u32) -> TickType_t {
    esp_idf_hal::delay::TickType::new_millis(u64::from(ms)).ticks()
}
