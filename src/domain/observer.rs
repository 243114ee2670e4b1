//! Application-facing outputs of the controller core

use crate::domain::models::{AppEvent, ConnectionStatus, ControllerSnapshot};
use tokio::sync::mpsc;

/// Receives connectivity changes, decoded snapshots and battery updates.
///
/// Callbacks run on whichever thread delivered the notification.
/// `on_snapshot` is called while the snapshot store is locked, so
/// implementations must not call back into the same service.
pub trait ControllerObserver: Send + Sync {
    fn on_connection_changed(&self, _status: ConnectionStatus) {}

    fn on_snapshot(&self, snapshot: &ControllerSnapshot);

    fn on_battery_level(&self, _level: u8) {}
}

/// Forwards every callback as an [`AppEvent`] over an unbounded channel
pub struct ChannelObserver {
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl ChannelObserver {
    pub fn new(event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { event_sender }
    }

    /// Create an observer together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ControllerObserver for ChannelObserver {
    fn on_connection_changed(&self, status: ConnectionStatus) {
        let _ = self.event_sender.send(AppEvent::ConnectionStatus(status));
    }

    fn on_snapshot(&self, snapshot: &ControllerSnapshot) {
        let _ = self.event_sender.send(AppEvent::Snapshot(*snapshot));
    }

    fn on_battery_level(&self, level: u8) {
        let _ = self.event_sender.send(AppEvent::BatteryLevel(level));
    }
}
