//! Daydream Controller Protocol
//!
//! GATT identifiers and the bit-level layout of the notification payloads
//! sent by the Daydream controller.

use crate::domain::models::DecodedFields;
use std::fmt;
use thiserror::Error;

/// Advertised local name contains this string
pub const DAYDREAM_DEVICE_NAME: &str = "Daydream controller";

/// Daydream Controller BLE Service UUID (16-bit 0xFE55)
pub const DAYDREAM_SERVICE_UUID: &str = "0000fe55-0000-1000-8000-00805f9b34fb";

/// Sensor data characteristic - notifies one motion frame per sample
pub const DAYDREAM_DATA_CHAR_UUID: &str = "00000001-1000-1000-8000-00805f9b34fb";

/// Standard Battery Service (0x180F)
pub const BATTERY_SERVICE_UUID: &str = "0000180f-0000-1000-8000-00805f9b34fb";

/// Standard Battery Level characteristic (0x2A19)
pub const BATTERY_LEVEL_CHAR_UUID: &str = "00002a19-0000-1000-8000-00805f9b34fb";

/// Size of a motion notification in bytes
pub const MOTION_FRAME_LEN: usize = 20;

/// Size of a battery level notification in bytes
pub const BATTERY_FRAME_LEN: usize = 1;

/// True if an advertised local name belongs to a Daydream controller
pub fn is_daydream_device_name(name: &str) -> bool {
    name.contains(DAYDREAM_DEVICE_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Motion,
    Battery,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion => f.write_str("motion"),
            Self::Battery => f.write_str("battery"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Invalid {frame} frame length: {actual} (expected {expected})")]
    InvalidFrameLength {
        frame: FrameKind,
        expected: usize,
        actual: usize,
    },
}

/// Parse a 20-byte motion frame into raw integer fields
///
/// # Motion Frame Structure (20 bytes, MSB first, no padding)
///
/// ```text
/// bits   0..9    : Timestamp (9 bit, ms, wraps at 512)
/// bits   9..14   : Sequence number (5 bit)
/// bits  14..53   : Orientation x, y, z (13 bit signed each, axis-angle)
/// bits  53..92   : Accelerometer x, y, z (13 bit signed each)
///                  x keeps only 11 significant bits: bits 64..66 are
///                  folded onto bits 62..64 and its two low bits read zero
/// bits  92..131  : Gyroscope x, y, z (13 bit signed each, 0.5 °/s)
/// bits 131..139  : Touchpad X (8 bit)
/// bits 139..147  : Touchpad Y (8 bit)
/// bits 147..152  : Buttons (byte 18 bits 4..0)
///                  bit 0: Click
///                  bit 1: Home
///                  bit 2: App
///                  bit 3: Volume Plus
///                  bit 4: Volume Minus
/// byte 19        : Reserved
/// ```
pub fn parse_motion_frame(bytes: &[u8]) -> Result<DecodedFields, ProtocolError> {
    let frame: &Frame = bytes
        .try_into()
        .map_err(|_| ProtocolError::InvalidFrameLength {
            frame: FrameKind::Motion,
            expected: MOTION_FRAME_LEN,
            actual: bytes.len(),
        })?;

    Ok(DecodedFields {
        timestamp: timestamp(frame),
        sequence: sequence(frame),
        orientation: [
            orientation_x(frame),
            orientation_y(frame),
            orientation_z(frame),
        ],
        acceleration: [
            acceleration_x(frame),
            acceleration_y(frame),
            acceleration_z(frame),
        ],
        angular_velocity: [
            angular_velocity_x(frame),
            angular_velocity_y(frame),
            angular_velocity_z(frame),
        ],
        touch_x: touch_x(frame),
        touch_y: touch_y(frame),
        buttons: button_flags(frame),
    })
}

/// Parse a 1-byte battery level notification (percent)
pub fn parse_battery_frame(bytes: &[u8]) -> Result<u8, ProtocolError> {
    match bytes {
        [level] => Ok(*level),
        _ => Err(ProtocolError::InvalidFrameLength {
            frame: FrameKind::Battery,
            expected: BATTERY_FRAME_LEN,
            actual: bytes.len(),
        }),
    }
}

/// A motion frame of the correct length
pub type Frame = [u8; MOTION_FRAME_LEN];

/// Recover a 13-bit signed value whose bits sit in the top of `aligned`.
///
/// The shift must be arithmetic so the sign bit is replicated.
fn signed13(aligned: u16) -> i16 {
    (aligned as i16) >> 3
}

fn b(frame: &Frame, index: usize) -> u16 {
    frame[index] as u16
}

pub fn timestamp(frame: &Frame) -> u16 {
    b(frame, 0) << 1 | b(frame, 1) >> 7
}

pub fn sequence(frame: &Frame) -> u8 {
    (frame[1] & 0b0111_1100) >> 2
}

pub fn orientation_x(frame: &Frame) -> i16 {
    signed13(b(frame, 1) << 14 | b(frame, 2) << 6 | (b(frame, 3) & 0b1110_0000) >> 2)
}

pub fn orientation_y(frame: &Frame) -> i16 {
    signed13(b(frame, 3) << 11 | b(frame, 4) << 3)
}

pub fn orientation_z(frame: &Frame) -> i16 {
    signed13(b(frame, 5) << 8 | b(frame, 6) & 0b1111_1000)
}

pub fn acceleration_x(frame: &Frame) -> i16 {
    // byte 8 bits 7..6 are OR'd onto byte 7 bits 1..0, not appended below them
    signed13(b(frame, 6) << 13 | b(frame, 7) << 5 | (b(frame, 8) & 0b1100_0000) >> 1)
}

pub fn acceleration_y(frame: &Frame) -> i16 {
    signed13(b(frame, 8) << 10 | (b(frame, 9) & 0b1111_1110) << 2)
}

pub fn acceleration_z(frame: &Frame) -> i16 {
    signed13(b(frame, 9) << 15 | b(frame, 10) << 7 | (b(frame, 11) & 0b1111_0000) >> 1)
}

pub fn angular_velocity_x(frame: &Frame) -> i16 {
    signed13(b(frame, 11) << 12 | b(frame, 12) << 4 | (b(frame, 13) & 0b1000_0000) >> 4)
}

pub fn angular_velocity_y(frame: &Frame) -> i16 {
    signed13(b(frame, 13) << 9 | (b(frame, 14) & 0b1111_1100) << 1)
}

pub fn angular_velocity_z(frame: &Frame) -> i16 {
    signed13(b(frame, 14) << 14 | b(frame, 15) << 6 | (b(frame, 16) & 0b1110_0000) >> 2)
}

pub fn touch_x(frame: &Frame) -> u8 {
    frame[16] << 3 | frame[17] >> 5
}

pub fn touch_y(frame: &Frame) -> u8 {
    frame[17] << 3 | frame[18] >> 5
}

pub fn button_flags(frame: &Frame) -> u8 {
    frame[18] & 0b0001_1111
}

/// Pack raw fields into a motion frame, the inverse of [`parse_motion_frame`].
///
/// Used to replay recorded sessions and to drive simulated controllers.
/// Out-of-range values are truncated to their field width; byte 19 is zero.
/// The two low bits of acceleration x come back OR'd onto bits 3..2, so
/// only multiples of four survive unchanged.
pub fn encode_motion_frame(fields: &DecodedFields) -> [u8; MOTION_FRAME_LEN] {
    let mut writer = BitWriter::default();
    writer.push(fields.timestamp as u32, 9);
    writer.push(fields.sequence as u32, 5);
    for value in fields
        .orientation
        .iter()
        .chain(&fields.acceleration)
        .chain(&fields.angular_velocity)
    {
        writer.push(*value as u16 as u32, 13);
    }
    writer.push(fields.touch_x as u32, 8);
    writer.push(fields.touch_y as u32, 8);
    writer.push(fields.buttons as u32, 5);
    writer.bytes
}

#[derive(Default)]
struct BitWriter {
    bytes: [u8; MOTION_FRAME_LEN],
    position: usize,
}

impl BitWriter {
    fn push(&mut self, value: u32, width: usize) {
        for bit in (0..width).rev() {
            if (value >> bit) & 1 != 0 {
                self.bytes[self.position / 8] |= 0x80 >> (self.position % 8);
            }
            self.position += 1;
        }
    }
}
