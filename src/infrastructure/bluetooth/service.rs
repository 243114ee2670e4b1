//! Controller Service Module
//!
//! Entry point for the BLE transport: it hands over raw notification
//! payloads and connectivity changes, and the service runs them through the
//! decoder, the snapshot store and the registered observer.

use crate::domain::models::{ConnectionStatus, ControllerSnapshot};
use crate::domain::observer::ControllerObserver;
use crate::domain::settings::Settings;
use crate::domain::store::SnapshotStore;
use crate::infrastructure::bluetooth::protocol::{self, ProtocolError};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Behaviour switches taken from [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Opt-in: drop both stored snapshots when the transport reports a
    /// disconnect. Off by default, where connectivity is only relayed.
    pub reset_on_disconnect: bool,
    /// Trace every accepted raw frame
    pub raw_data_logging: bool,
}

impl From<&Settings> for ServiceConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            reset_on_disconnect: settings.reset_on_disconnect,
            raw_data_logging: settings.debug_raw_data_logging,
        }
    }
}

/// Decodes controller notifications and publishes the results
pub struct ControllerService {
    store: SnapshotStore,
    observer: Option<Arc<dyn ControllerObserver>>,
    config: ServiceConfig,
}

impl ControllerService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            store: SnapshotStore::new(),
            observer: None,
            config,
        }
    }

    pub fn with_observer(config: ServiceConfig, observer: Arc<dyn ControllerObserver>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new(config)
        }
    }

    /// Register (or replace) the observer
    pub fn set_observer(&mut self, observer: Arc<dyn ControllerObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Handle a motion notification.
    ///
    /// A frame of the wrong length is rejected without touching the stored
    /// snapshots or calling the observer.
    pub fn handle_motion_notification(
        &self,
        bytes: &[u8],
    ) -> Result<ControllerSnapshot, ProtocolError> {
        let fields = protocol::parse_motion_frame(bytes).inspect_err(|e| debug!("{}", e))?;

        if self.config.raw_data_logging {
            trace!("Raw frame: {:02X?}", bytes);
        }

        let snapshot = self.store.accept(&fields, |snapshot| {
            if let Some(observer) = &self.observer {
                observer.on_snapshot(snapshot);
            }
        });
        Ok(snapshot)
    }

    /// Handle a battery level notification
    pub fn handle_battery_notification(&self, bytes: &[u8]) -> Result<u8, ProtocolError> {
        let level = protocol::parse_battery_frame(bytes).inspect_err(|e| debug!("{}", e))?;

        self.store.set_battery_level(level);
        debug!("Battery level: {}%", level);
        if let Some(observer) = &self.observer {
            observer.on_battery_level(level);
        }
        Ok(level)
    }

    /// Relay a connectivity change from the transport.
    ///
    /// Stored snapshots and the battery level are left alone unless
    /// [`ServiceConfig::reset_on_disconnect`] is set.
    pub fn handle_connection_changed(&self, connected: bool) {
        let status = ConnectionStatus::from(connected);
        info!("Controller {:?}", status);

        if status == ConnectionStatus::Disconnected && self.config.reset_on_disconnect {
            self.store.reset();
        }
        if let Some(observer) = &self.observer {
            observer.on_connection_changed(status);
        }
    }

    pub fn current(&self) -> ControllerSnapshot {
        self.store.current()
    }

    pub fn previous(&self) -> ControllerSnapshot {
        self.store.previous()
    }

    /// Consistent (current, previous) pair
    pub fn snapshots(&self) -> (ControllerSnapshot, ControllerSnapshot) {
        self.store.pair()
    }

    pub fn battery_level(&self) -> Option<u8> {
        self.store.battery_level()
    }
}

impl Default for ControllerService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
