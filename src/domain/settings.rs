use crate::infrastructure::bluetooth::protocol;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_true")]
    pub show_file_line: bool,
    #[serde(default = "default_false")]
    pub show_thread_ids: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
    /// Extra `EnvFilter` directives, e.g. `"daydream_controller::infrastructure=trace"`
    #[serde(default)]
    pub directives: Vec<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_false(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_true(),
            show_thread_ids: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: default_rotation(),
            directives: Vec::new(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "daydream_controller".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // Logging Settings
    #[serde(default)]
    pub log_settings: LogSettings,

    // BLE identifiers for the transport layer. The core never opens a
    // connection itself; whoever scans and subscribes reads these.
    /// Substring of the advertised local name, see [`Settings::is_controller_name`]
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Primary service to discover and the motion characteristic to subscribe to
    #[serde(default = "default_service_uuid")]
    pub ble_service_uuid: String,
    #[serde(default = "default_data_uuid")]
    pub ble_data_char_uuid: String,
    /// Battery service and its level characteristic, read once then subscribed
    #[serde(default = "default_battery_service_uuid")]
    pub battery_service_uuid: String,
    #[serde(default = "default_battery_level_uuid")]
    pub battery_level_char_uuid: String,

    // Core behaviour
    #[serde(default = "default_false")]
    pub reset_on_disconnect: bool,

    // Debug Settings
    #[serde(default = "default_false")]
    pub debug_raw_data_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_settings: LogSettings::default(),
            device_name: default_device_name(),
            ble_service_uuid: default_service_uuid(),
            ble_data_char_uuid: default_data_uuid(),
            battery_service_uuid: default_battery_service_uuid(),
            battery_level_char_uuid: default_battery_level_uuid(),
            reset_on_disconnect: default_false(),
            debug_raw_data_logging: default_false(),
        }
    }
}

impl Settings {
    /// True if an advertised local name matches the configured device name
    pub fn is_controller_name(&self, advertised: &str) -> bool {
        !self.device_name.is_empty() && advertised.contains(&self.device_name)
    }

    /// (service, characteristic) pairs to subscribe to, motion first
    pub fn notification_characteristics(&self) -> [(&str, &str); 2] {
        [
            (self.ble_service_uuid.as_str(), self.ble_data_char_uuid.as_str()),
            (
                self.battery_service_uuid.as_str(),
                self.battery_level_char_uuid.as_str(),
            ),
        ]
    }
}

fn default_device_name() -> String {
    protocol::DAYDREAM_DEVICE_NAME.to_string()
}
fn default_service_uuid() -> String {
    protocol::DAYDREAM_SERVICE_UUID.to_string()
}
fn default_data_uuid() -> String {
    protocol::DAYDREAM_DATA_CHAR_UUID.to_string()
}
fn default_battery_service_uuid() -> String {
    protocol::BATTERY_SERVICE_UUID.to_string()
}
fn default_battery_level_uuid() -> String {
    protocol::BATTERY_LEVEL_CHAR_UUID.to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    /// Load from the per-user config directory, falling back to defaults
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::load_from(settings_path))
    }

    /// Load from an explicit path, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load_from(settings_path: impl Into<PathBuf>) -> Self {
        let settings_path = settings_path.into();
        let settings = match Self::load_from_file(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(
                    "Using default settings ({}): {}",
                    settings_path.display(),
                    e
                );
                Settings::default()
            }
        };

        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("DaydreamController");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
