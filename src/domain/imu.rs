//! IMU (Inertial Measurement Unit) unit conversion
//!
//! Converts the raw fixed-point orientation, accelerometer and gyroscope
//! readings of a motion frame into physical units, and provides the small
//! amount of quaternion algebra consumers need to re-center orientation.

use crate::domain::models::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Mul;

/// IMU scaling factors
pub mod imu_scale {
    use super::PI;

    /// Orientation axis-angle, raw → radians
    pub const ORIENTATION: f32 = (2.0 * PI / 4095.0) as f32;
    /// Accelerometer (±8 g range, 13-bit resolution), raw → m/s²
    pub const ACCEL: f32 = (9.8 * 8.0 / 4095.0) as f32;
    /// Gyroscope (unit 0.5 °/s), raw → rad/s
    pub const GYRO: f32 = (PI * 2048.0 / 4095.0 / 180.0) as f32;
}

/// Rotation as a four-component quaternion (w, x, y, z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation by `angle` radians about `axis`. The axis must be unit length.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self {
            w: cos,
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
    }

    pub fn norm(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Multiplicative inverse. Returns identity for a zero quaternion.
    pub fn inverse(&self) -> Self {
        let norm_sq = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;
        if norm_sq == 0.0 {
            return Self::IDENTITY;
        }
        let c = self.conjugate();
        Self {
            w: c.w / norm_sq,
            x: c.x / norm_sq,
            y: c.y / norm_sq,
            z: c.z / norm_sq,
        }
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product: applying `rhs` first, then `self`
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

/// Convert the raw axis-angle triplet into a unit quaternion.
///
/// The vector direction is the rotation axis and its magnitude the angle.
/// A zero vector maps to exactly [`Quaternion::IDENTITY`].
pub fn orientation_from_raw(raw: [i16; 3]) -> Quaternion {
    let x = raw[0] as f32 * imu_scale::ORIENTATION;
    let y = raw[1] as f32 * imu_scale::ORIENTATION;
    let z = raw[2] as f32 * imu_scale::ORIENTATION;

    let magnitude_sq = x * x + y * y + z * z;
    if magnitude_sq > 0.0 {
        let angle = magnitude_sq.sqrt();
        let axis = Vec3::new(x / angle, y / angle, z / angle);
        Quaternion::from_axis_angle(axis, angle)
    } else {
        Quaternion::IDENTITY
    }
}

pub fn acceleration_from_raw(raw: [i16; 3]) -> Vec3 {
    scale(raw, imu_scale::ACCEL)
}

pub fn angular_velocity_from_raw(raw: [i16; 3]) -> Vec3 {
    scale(raw, imu_scale::GYRO)
}

fn scale(raw: [i16; 3], factor: f32) -> Vec3 {
    Vec3::new(
        raw[0] as f32 * factor,
        raw[1] as f32 * factor,
        raw[2] as f32 * factor,
    )
}

/// Zero reference for orientation, e.g. captured when the home button goes down
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationReference {
    inverse: Quaternion,
}

impl OrientationReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `current` the new zero orientation
    pub fn recenter(&mut self, current: Quaternion) {
        self.inverse = current.inverse();
        tracing::info!("Orientation re-centered");
    }

    /// Orientation relative to the stored zero
    pub fn apply(&self, orientation: Quaternion) -> Quaternion {
        self.inverse * orientation
    }

    pub fn reset(&mut self) {
        self.inverse = Quaternion::IDENTITY;
    }
}
