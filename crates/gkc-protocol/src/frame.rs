//! The frame envelope: `0x02 | payload_size | payload | crc_lo crc_hi | 0x03`.

use gkc_errors::FrameError;

use crate::crc::crc16;

/// Start-of-frame sentinel.
pub const START_BYTE: u8 = 0x02;
/// End-of-frame sentinel.
pub const END_BYTE: u8 = 0x03;
/// Bytes surrounding the payload: start, length, crc_lo, crc_hi, end.
pub const NON_PAYLOAD_BYTES: usize = 5;

/// Encodes `payload` into a complete frame.
///
/// Fails with [`FrameError::PayloadTooLarge`] if `payload` is empty or
/// longer than 255 bytes — the length prefix is a single unsigned byte.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.is_empty() || payload.len() > u8::MAX as usize {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut frame = Vec::with_capacity(payload.len() + NON_PAYLOAD_BYTES);
    frame.push(START_BYTE);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);
    let checksum = crc16(payload);
    frame.extend_from_slice(&checksum.to_le_bytes());
    frame.push(END_BYTE);
    Ok(frame)
}

/// Validates and strips a complete frame, returning its payload slice.
///
/// Checks boundaries, declared length, and CRC before trusting anything
/// about `frame` — `payload_size` is never trusted ahead of these checks.
pub fn decode_frame(frame: &[u8]) -> Result<&[u8], FrameError> {
    if frame.len() < NON_PAYLOAD_BYTES + 1 {
        return Err(FrameError::BadLength);
    }
    if frame[0] != START_BYTE {
        return Err(FrameError::BadStart);
    }

    let payload_size = frame[1] as usize;
    if payload_size == 0 {
        return Err(FrameError::BadLength);
    }

    let expected_len = NON_PAYLOAD_BYTES + payload_size;
    if frame.len() != expected_len {
        return Err(FrameError::BadLength);
    }
    if frame[expected_len - 1] != END_BYTE {
        return Err(FrameError::BadEnd);
    }

    let payload = &frame[2..2 + payload_size];
    let crc_lo = frame[2 + payload_size];
    let crc_hi = frame[2 + payload_size + 1];
    let checksum = u16::from_le_bytes([crc_lo, crc_hi]);

    if crc16(payload) != checksum {
        return Err(FrameError::BadChecksum);
    }

    Ok(payload)
}
