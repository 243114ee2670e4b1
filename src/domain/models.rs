use crate::domain::imu::Quaternion;
use serde::{Deserialize, Serialize};

/// Raw integer fields of one motion frame, before any unit conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodedFields {
    /// 9 bits, 0-511
    pub timestamp: u16,
    /// 5 bits, 0-31
    pub sequence: u8,
    /// Axis-angle, 13-bit signed per axis
    pub orientation: [i16; 3],
    /// 13-bit signed per axis, ±8 g full range
    pub acceleration: [i16; 3],
    /// 13-bit signed per axis, unit = 0.5 °/s
    pub angular_velocity: [i16; 3],
    pub touch_x: u8,
    pub touch_y: u8,
    /// 5 bits: click, home, app, plus, minus (LSB first)
    pub buttons: u8,
}

/// Three-axis vector in physical units (m/s² or rad/s depending on field)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Touchpad position, upper left (0, 0) to lower right (1, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchPosition {
    pub x: f32,
    pub y: f32,
}

/// Steady-state button levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    pub click: bool,
    pub home: bool,
    pub app: bool,
    pub plus: bool,
    pub minus: bool,
}

impl Buttons {
    pub const CLICK: u8 = 0b0_0001;
    pub const HOME: u8 = 0b0_0010;
    pub const APP: u8 = 0b0_0100;
    pub const PLUS: u8 = 0b0_1000;
    pub const MINUS: u8 = 0b1_0000;

    /// Build from the 5-bit button mask of a motion frame. Upper bits are ignored.
    pub fn from_mask(mask: u8) -> Self {
        Self {
            click: mask & Self::CLICK != 0,
            home: mask & Self::HOME != 0,
            app: mask & Self::APP != 0,
            plus: mask & Self::PLUS != 0,
            minus: mask & Self::MINUS != 0,
        }
    }

    pub fn mask(&self) -> u8 {
        let mut mask = 0;
        if self.click {
            mask |= Self::CLICK;
        }
        if self.home {
            mask |= Self::HOME;
        }
        if self.app {
            mask |= Self::APP;
        }
        if self.plus {
            mask |= Self::PLUS;
        }
        if self.minus {
            mask |= Self::MINUS;
        }
        mask
    }

    pub fn any(&self) -> bool {
        self.mask() != 0
    }
}

/// Transition of a single boolean signal between two consecutive snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Signal went from true to false
    pub up: bool,
    /// Signal went from false to true
    pub down: bool,
}

/// Transient events derived by diffing against the previous accepted snapshot.
///
/// Touch contributes one pair and each of the five buttons one pair, twelve
/// booleans in total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientEvents {
    pub touch: Edge,
    pub click: Edge,
    pub home: Edge,
    pub app: Edge,
    pub plus: Edge,
    pub minus: Edge,
}

impl TransientEvents {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Edge)> {
        [
            ("touch", self.touch),
            ("click", self.click),
            ("home", self.home),
            ("app", self.app),
            ("plus", self.plus),
            ("minus", self.minus),
        ]
        .into_iter()
    }

    /// True when at least one signal changed
    pub fn any(&self) -> bool {
        self.iter().any(|(_, edge)| edge.up || edge.down)
    }
}

/// Decoded and unit-converted state of the controller for one motion frame.
///
/// Immutable once built; a new one is produced for every accepted frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Hardware timestamp in ms, wraps every 512 ms
    pub timestamp_ms: u16,
    /// Rolling sequence counter 0-31, left to consumers for drop detection
    pub sequence: u8,
    pub orientation: Quaternion,
    /// m/s²
    pub acceleration: Vec3,
    /// rad/s
    pub angular_velocity: Vec3,
    pub touch: TouchPosition,
    pub is_touching: bool,
    pub buttons: Buttons,
    pub edges: TransientEvents,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            timestamp_ms: 0,
            sequence: 0,
            orientation: Quaternion::IDENTITY,
            acceleration: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            touch: TouchPosition::default(),
            is_touching: false,
            buttons: Buttons::default(),
            edges: TransientEvents::default(),
        }
    }
}

impl ControllerSnapshot {
    pub fn touch_up(&self) -> bool {
        self.edges.touch.up
    }
    pub fn touch_down(&self) -> bool {
        self.edges.touch.down
    }
    pub fn click_up(&self) -> bool {
        self.edges.click.up
    }
    pub fn click_down(&self) -> bool {
        self.edges.click.down
    }
    pub fn home_up(&self) -> bool {
        self.edges.home.up
    }
    pub fn home_down(&self) -> bool {
        self.edges.home.down
    }
    pub fn app_up(&self) -> bool {
        self.edges.app.up
    }
    pub fn app_down(&self) -> bool {
        self.edges.app.down
    }
    pub fn plus_up(&self) -> bool {
        self.edges.plus.up
    }
    pub fn plus_down(&self) -> bool {
        self.edges.plus.down
    }
    pub fn minus_up(&self) -> bool {
        self.edges.minus.up
    }
    pub fn minus_down(&self) -> bool {
        self.edges.minus.down
    }

    /// Number of sequence steps from `prev` to this snapshot, modulo 32.
    ///
    /// 1 for back-to-back frames; anything larger means frames were lost in
    /// transit. 0 means a repeated (or wrapped by exactly 32) counter.
    pub fn sequence_delta(&self, prev: &ControllerSnapshot) -> u8 {
        self.sequence.wrapping_sub(prev.sequence) & 0x1F
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

impl From<bool> for ConnectionStatus {
    fn from(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Snapshot(ControllerSnapshot),
    BatteryLevel(u8),
    ConnectionStatus(ConnectionStatus),
}
