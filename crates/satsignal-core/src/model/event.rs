// ── Event envelopes ──
//
// `DomainEvent` is what arrives from decoders, resolvers and the device
// layer. `UiEvent` is what the alert layer publishes on the UI bus.

use serde::{Deserialize, Serialize};

use super::alert::{AlertRecord, ScreenRequest};
use super::hardware::HardwareWalletEvent;
use super::payment::PaymentSessionSummary;
use super::transaction::TransactionSeenEvent;
use super::uri::PaymentUri;
use crate::error::CoreError;

/// An incoming event the correlator may turn into an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DomainEvent {
    PaymentUri(PaymentUri),
    PaymentSession(PaymentSessionSummary),
    TransactionSeen(TransactionSeenEvent),
    HardwareWallet(HardwareWalletEvent),
}

impl DomainEvent {
    /// Decode one JSON-encoded event.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PaymentUri(_) => "payment_uri",
            Self::PaymentSession(_) => "payment_session",
            Self::TransactionSeen(_) => "transaction_seen",
            Self::HardwareWallet(_) => "hardware_wallet",
        }
    }
}

/// Notifications published on the UI bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum UiEvent {
    /// A new alert should be shown.
    AlertAdded(AlertRecord),
    /// The currently shown alert has been dealt with.
    RemoveAlert,
    /// Wallet contents changed; detail views should refresh.
    WalletDetailChanged,
    /// The user chose to switch to the wallet on an attached device.
    SwitchWalletRequested,
    /// Show a follow-up workflow.
    ScreenRequested(ScreenRequest),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AlertAdded(_) => "alert_added",
            Self::RemoveAlert => "remove_alert",
            Self::WalletDetailChanged => "wallet_detail_changed",
            Self::SwitchWalletRequested => "switch_wallet_requested",
            Self::ScreenRequested(_) => "screen_requested",
        }
    }
}
