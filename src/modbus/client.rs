//! Modbus RTU polling client.
//!
//! One transaction per call: build the request, transmit it inside the
//! RS-485 direction bracket, collect the reply against a deadline, and
//! decode it. Errors are returned, never retried here — the control loop
//! polls again on its next iteration.

use log::trace;

use crate::app::ports::SerialLink;
use crate::drivers::rs485::Rs485Transceiver;
use crate::modbus::frame::{self, ModbusError, MAX_RESPONSE_LEN};

pub struct ModbusClient {
    slave_id: u8,
    response_timeout_ms: u32,
}

impl ModbusClient {
    pub fn new(slave_id: u8, response_timeout_ms: u32) -> Self {
        Self {
            slave_id,
            response_timeout_ms,
        }
    }

    pub fn slave_id(&self) -> u8 {
        self.slave_id
    }

    /// Execute one Read Holding Registers transaction and return the first
    /// register value.
    ///
    /// The serial line is occupied exclusively for the duration of the
    /// call; the control loop must not service the HTTP client
    /// concurrently with this.
    pub fn read_holding_registers(
        &self,
        link: &mut impl SerialLink,
        rs485: &mut Rs485Transceiver,
        address: u16,
        count: u16,
    ) -> Result<u16, ModbusError> {
        let request = frame::build_read_holding_request(self.slave_id, address, count);

        // Stale bytes from a previous aborted exchange would desync framing.
        link.discard_input();

        rs485.before_transmit();
        link.write_all(&request);
        link.flush_tx();
        rs485.after_transmit();

        let reply = self.collect_response(link)?;
        let value = frame::decode_response(&reply, self.slave_id, count)?;
        trace!("modbus: reg {} = {}", address, value);
        Ok(value)
    }

    /// Read reply bytes until the frame length implied by its header is
    /// reached. Each byte is granted the full response timeout; a window
    /// with no byte at all aborts the transaction, as `Timeout` if nothing
    /// arrived or `ShortFrame` for a truncated reply.
    fn collect_response(
        &self,
        link: &mut impl SerialLink,
    ) -> Result<heapless::Vec<u8, MAX_RESPONSE_LEN>, ModbusError> {
        let mut reply: heapless::Vec<u8, MAX_RESPONSE_LEN> = heapless::Vec::new();

        loop {
            let expected = frame::expected_response_len(&reply);
            if let Some(len) = expected {
                if reply.len() >= len.min(MAX_RESPONSE_LEN) {
                    return Ok(reply);
                }
            }

            match link.read_byte(self.response_timeout_ms) {
                Some(byte) => {
                    if reply.push(byte).is_err() {
                        // Longer than any frame we ever request.
                        return Err(ModbusError::BadByteCount);
                    }
                }
                None if reply.is_empty() => return Err(ModbusError::Timeout),
                // The line went quiet before the frame finished. Complete
                // frames return from the length check above, so anything
                // ending here is truncated.
                None => return Err(ModbusError::ShortFrame),
            }
        }
    }
}
