use crate::domain::edges::{self, Signals};
use crate::domain::imu;
use crate::domain::models::{Buttons, ControllerSnapshot, DecodedFields, TouchPosition};

/// Normalize raw touchpad coordinates to [0, 1] and derive the touching flag.
///
/// The controller reports (0, 0) when no finger is on the pad.
pub fn touch_from_raw(raw_x: u8, raw_y: u8) -> (TouchPosition, bool) {
    let position = TouchPosition {
        x: raw_x as f32 / 255.0,
        y: raw_y as f32 / 255.0,
    };
    (position, raw_x != 0 || raw_y != 0)
}

impl ControllerSnapshot {
    /// Convert decoded frame fields to physical units and diff the result
    /// against the previously accepted snapshot.
    pub fn from_fields(fields: &DecodedFields, prev: &ControllerSnapshot) -> Self {
        let (touch, is_touching) = touch_from_raw(fields.touch_x, fields.touch_y);
        let buttons = Buttons::from_mask(fields.buttons);

        let now = Signals {
            touching: is_touching,
            buttons,
        };

        Self {
            timestamp_ms: fields.timestamp,
            sequence: fields.sequence,
            orientation: imu::orientation_from_raw(fields.orientation),
            acceleration: imu::acceleration_from_raw(fields.acceleration),
            angular_velocity: imu::angular_velocity_from_raw(fields.angular_velocity),
            touch,
            is_touching,
            buttons,
            edges: edges::detect(&now, &prev.signals()),
        }
    }

    pub fn signals(&self) -> Signals {
        Signals {
            touching: self.is_touching,
            buttons: self.buttons,
        }
    }
}
