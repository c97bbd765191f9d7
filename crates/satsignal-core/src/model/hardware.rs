// ── Hardware wallet device events ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Event types emitted by the device-communication layer.
///
/// The alert layer recognizes only `ShowDeviceReady` and
/// `ShowDeviceFailed`; the rest drive wizard flows elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HardwareEventType {
    ShowDeviceReady,
    ShowDeviceFailed,
    ShowDeviceDetached,
    ShowDeviceStopped,
    ShowPinEntry,
    ShowButtonPress,
    ShowOperationSucceeded,
    ShowOperationFailed,
    ProvideEntropy,
}

/// Feature report returned by an attached device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// User-assigned device label.
    #[serde(default)]
    pub label: String,
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub device_id: Option<String>,
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub pin_protection: bool,
    #[serde(default)]
    pub passphrase_protection: bool,
}

/// A device attachment, detachment, or fault notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareWalletEvent {
    pub event_type: HardwareEventType,
    #[serde(default)]
    pub features: Option<Features>,
}

impl HardwareWalletEvent {
    pub fn new(event_type: HardwareEventType) -> Self {
        Self {
            event_type,
            features: None,
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = Some(features);
        self
    }

    /// Device label, or an empty string when no feature report is attached.
    pub fn label(&self) -> &str {
        self.features.as_ref().map_or("", |f| f.label.as_str())
    }
}
