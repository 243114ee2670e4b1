//! Daydream controller telemetry core.
//!
//! Decodes the 20-byte motion notifications and 1-byte battery notifications
//! of a Daydream View controller into [`ControllerSnapshot`]s, derives
//! press/release edges against the previous snapshot, and publishes the
//! result to a [`ControllerObserver`].
//!
//! ```no_run
//! use daydream_controller::{ChannelObserver, ControllerService, ServiceConfig};
//! use std::sync::Arc;
//!
//! let (observer, mut events) = ChannelObserver::channel();
//! let service = ControllerService::with_observer(ServiceConfig::default(), Arc::new(observer));
//!
//! // called from the BLE notification handler
//! # let payload = [0u8; 20];
//! let _ = service.handle_motion_notification(&payload);
//! # let _ = events.try_recv();
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::imu::{OrientationReference, Quaternion};
pub use domain::models::{
    AppEvent, Buttons, ConnectionStatus, ControllerSnapshot, DecodedFields, Edge, TouchPosition,
    TransientEvents, Vec3,
};
pub use domain::observer::{ChannelObserver, ControllerObserver};
pub use domain::settings::{LogSettings, Settings, SettingsService};
pub use domain::store::SnapshotStore;
pub use infrastructure::bluetooth::protocol::{FrameKind, ProtocolError};
pub use infrastructure::bluetooth::{ControllerService, ServiceConfig};
pub use infrastructure::logging::{init_logger, LoggingGuard};
