//! Modbus RTU frame building and decoding.
//!
//! Wire format (Read Holding Registers request):
//! ```text
//! ┌───────┬──────┬────────────┬───────────┬──────────┐
//! │ slave │ 0x03 │ start addr │ reg count │ CRC-16   │
//! │ 1 B   │ 1 B  │ 2 B BE     │ 2 B BE    │ 2 B LE   │
//! └───────┴──────┴────────────┴───────────┴──────────┘
//! ```
//!
//! A normal reply echoes slave and function, then a byte count and the
//! register payload. An exception reply sets the high bit of the function
//! byte and carries a one-byte exception code instead.

use core::fmt;

/// Read Holding Registers.
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;

/// Length of a request frame.
pub const REQUEST_LEN: usize = 8;
/// Length of an exception reply (slave, fc|0x80, code, CRC).
pub const EXCEPTION_FRAME_LEN: usize = 5;
/// Largest reply this client ever expects (count is at most a handful of
/// registers; the on-wire limit of 125 is irrelevant here).
pub const MAX_RESPONSE_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Exception code returned by the slave in an exception reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCode {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    SlaveDeviceFailure,
    Acknowledge,
    SlaveDeviceBusy,
    Other(u8),
}

impl ExceptionCode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::SlaveDeviceFailure,
            0x05 => Self::Acknowledge,
            0x06 => Self::SlaveDeviceBusy,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::SlaveDeviceFailure => 0x04,
            Self::Acknowledge => 0x05,
            Self::SlaveDeviceBusy => 0x06,
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalFunction => write!(f, "illegal function"),
            Self::IllegalDataAddress => write!(f, "illegal data address"),
            Self::IllegalDataValue => write!(f, "illegal data value"),
            Self::SlaveDeviceFailure => write!(f, "slave device failure"),
            Self::Acknowledge => write!(f, "acknowledge"),
            Self::SlaveDeviceBusy => write!(f, "slave device busy"),
            Self::Other(code) => write!(f, "exception 0x{code:02X}"),
        }
    }
}

/// Everything that can go wrong in one transaction. All variants are
/// non-fatal: the caller logs and retries on the next loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModbusError {
    /// No complete reply arrived before the transaction deadline.
    Timeout,
    /// Reply CRC did not match its payload.
    CrcMismatch,
    /// Reply ended before the advertised length.
    ShortFrame,
    /// Reply came from a different slave address.
    UnexpectedSlave,
    /// Reply carried a different function code than the request.
    UnexpectedFunction,
    /// Byte count disagrees with the requested register count.
    BadByteCount,
    /// The slave answered with an exception reply.
    Exception(ExceptionCode),
}

impl fmt::Display for ModbusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "response timeout"),
            Self::CrcMismatch => write!(f, "CRC mismatch"),
            Self::ShortFrame => write!(f, "short frame"),
            Self::UnexpectedSlave => write!(f, "reply from unexpected slave"),
            Self::UnexpectedFunction => write!(f, "unexpected function code"),
            Self::BadByteCount => write!(f, "bad byte count"),
            Self::Exception(code) => write!(f, "slave exception: {code}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CRC-16/MODBUS
// ---------------------------------------------------------------------------

/// CRC-16/MODBUS: init 0xFFFF, reflected polynomial 0xA001.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFFu16;
    for &b in data {
        crc ^= u16::from(b);
        for _ in 0..8 {
            crc = if (crc & 1) != 0 { (crc >> 1) ^ 0xA001 } else { crc >> 1 };
        }
    }
    crc
}

/// Verify the little-endian CRC trailer of a complete frame.
pub fn check_crc(frame: &[u8]) -> bool {
    if frame.len() < 3 {
        return false;
    }
    let crc_index = frame.len() - 2;
    let received = u16::from_le_bytes([frame[crc_index], frame[crc_index + 1]]);
    received == crc16(&frame[..crc_index])
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// Build a Read Holding Registers request frame.
pub fn build_read_holding_request(slave_id: u8, address: u16, count: u16) -> [u8; REQUEST_LEN] {
    let mut req = [0u8; REQUEST_LEN];
    req[0] = slave_id;
    req[1] = FC_READ_HOLDING_REGISTERS;
    req[2..4].copy_from_slice(&address.to_be_bytes());
    req[4..6].copy_from_slice(&count.to_be_bytes());
    let crc = crc16(&req[..6]);
    req[6..8].copy_from_slice(&crc.to_le_bytes());
    req
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Total frame length implied by the first three reply bytes, or `None`
/// until enough bytes have arrived to tell.
pub fn expected_response_len(partial: &[u8]) -> Option<usize> {
    if partial.len() < 3 {
        return None;
    }
    if partial[1] & 0x80 != 0 {
        Some(EXCEPTION_FRAME_LEN)
    } else {
        // slave + fc + byte count + payload + CRC
        Some(3 + partial[2] as usize + 2)
    }
}

/// Validate a complete reply frame and return the first register value.
pub fn decode_response(frame: &[u8], slave_id: u8, count: u16) -> Result<u16, ModbusError> {
    if frame.len() < EXCEPTION_FRAME_LEN {
        return Err(ModbusError::ShortFrame);
    }
    if !check_crc(frame) {
        return Err(ModbusError::CrcMismatch);
    }
    if frame[0] != slave_id {
        return Err(ModbusError::UnexpectedSlave);
    }
    if frame[1] & 0x80 != 0 {
        if frame[1] & 0x7F != FC_READ_HOLDING_REGISTERS {
            return Err(ModbusError::UnexpectedFunction);
        }
        return Err(ModbusError::Exception(ExceptionCode::from_code(frame[2])));
    }
    if frame[1] != FC_READ_HOLDING_REGISTERS {
        return Err(ModbusError::UnexpectedFunction);
    }
    let byte_count = frame[2] as usize;
    if byte_count != count as usize * 2 {
        return Err(ModbusError::BadByteCount);
    }
    if frame.len() != 3 + byte_count + 2 {
        return Err(ModbusError::ShortFrame);
    }
    Ok(u16::from_be_bytes([frame[3], frame[4]]))
}
