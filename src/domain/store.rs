//! Snapshot Store
//!
//! Keeps the two most recent accepted snapshots and the last battery level.
//! Motion updates replace (current, previous) and publish inside one critical
//! section; the battery level lives in its own atomic.

use crate::domain::models::{ControllerSnapshot, DecodedFields};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

const BATTERY_UNKNOWN: u16 = u16::MAX;

#[derive(Debug, Clone, Copy, Default)]
struct SnapshotPair {
    current: ControllerSnapshot,
    previous: ControllerSnapshot,
}

#[derive(Debug)]
pub struct SnapshotStore {
    snapshots: Mutex<SnapshotPair>,
    battery_level: AtomicU16,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(SnapshotPair::default()),
            battery_level: AtomicU16::new(BATTERY_UNKNOWN),
        }
    }

    // Snapshots are plain `Copy` data, so a panic in an observer cannot
    // leave the pair half-written.
    fn lock(&self) -> MutexGuard<'_, SnapshotPair> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Build a snapshot from `fields` against the current one, rotate it in,
    /// and hand it to `publish` before the lock is released.
    pub fn accept<F>(&self, fields: &DecodedFields, publish: F) -> ControllerSnapshot
    where
        F: FnOnce(&ControllerSnapshot),
    {
        let mut pair = self.lock();
        let snapshot = ControllerSnapshot::from_fields(fields, &pair.current);
        pair.previous = pair.current;
        pair.current = snapshot;
        publish(&snapshot);
        snapshot
    }

    pub fn current(&self) -> ControllerSnapshot {
        self.lock().current
    }

    pub fn previous(&self) -> ControllerSnapshot {
        self.lock().previous
    }

    /// (current, previous) read under a single lock
    pub fn pair(&self) -> (ControllerSnapshot, ControllerSnapshot) {
        let pair = self.lock();
        (pair.current, pair.previous)
    }

    /// Drop both snapshots back to the default state. Battery is kept.
    pub fn reset(&self) {
        *self.lock() = SnapshotPair::default();
    }

    pub fn set_battery_level(&self, level: u8) {
        self.battery_level.store(level as u16, Ordering::Release);
    }

    pub fn battery_level(&self) -> Option<u8> {
        match self.battery_level.load(Ordering::Acquire) {
            BATTERY_UNKNOWN => None,
            level => Some(level as u8),
        }
    }
}
