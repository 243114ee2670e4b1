//! Bluetooth Module
//!
//! Protocol handling for the Daydream controller. Discovery, connection and
//! GATT subscriptions belong to the platform transport, which only forwards
//! raw notification payloads here.
//!
//! ## Architecture
//!
//! ```text
//!        BLE transport (platform specific)
//!                       │  &[u8] / connected
//!                       ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   ControllerService                      │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!         ┌─────────────┼─────────────┐
//!         ▼             ▼             ▼
//! ┌───────────┐  ┌────────────┐  ┌──────────────┐
//! │ Protocol  │  │  Snapshot  │  │   Observer   │
//! │ - UUIDs   │  │   Store    │  │ - callbacks  │
//! │ - Parsing │  │ - edges    │  │ - AppEvent   │
//! └───────────┘  └────────────┘  └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - GATT identifiers and frame decoding
//! - [`service`] - Notification entry point and publication

pub mod protocol;
pub mod service;

// Re-export main service for convenience
pub use service::{ControllerService, ServiceConfig};
