// ── Alert records and deferred actions ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use super::payment::{PaymentRequestData, PaymentSessionSummary};
use super::severity::Severity;
use super::uri::PaymentUri;

/// Follow-up work attached to an alert, run only when the user invokes it.
///
/// Each variant holds exactly the data needed to execute later, so an
/// action can be stored, serialized, or inspected in tests without a UI.
/// See [`ActionExecutor`](crate::ActionExecutor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertAction {
    /// Dismiss the alert and open the send-payment flow for this URI.
    SendPayment { uri: PaymentUri },
    /// Persist the payment request and open its review screen.
    ReviewPaymentRequest { summary: Box<PaymentSessionSummary> },
    /// Dismiss the alert and ask the application to switch to the wallet
    /// on the attached device.
    SwitchWallet,
}

impl AlertAction {
    /// Short label for logs and tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendPayment { .. } => "send_payment",
            Self::ReviewPaymentRequest { .. } => "review_payment_request",
            Self::SwitchWallet => "switch_wallet",
        }
    }
}

/// A user-facing alert.
///
/// Fields are fixed at construction: severity in particular never changes
/// once the correlator has decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    id: Uuid,
    raised_at: DateTime<Utc>,
    message: String,
    severity: Severity,
    action: Option<AlertAction>,
}

impl AlertRecord {
    /// Purely informational alert.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            raised_at: Utc::now(),
            message: message.into(),
            severity,
            action: None,
        }
    }

    /// Alert carrying a follow-up action.
    pub fn with_action(
        message: impl Into<String>,
        severity: Severity,
        action: AlertAction,
    ) -> Self {
        Self {
            action: Some(action),
            ..Self::new(message, severity)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn raised_at(&self) -> DateTime<Utc> {
        self.raised_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn action(&self) -> Option<&AlertAction> {
        self.action.as_ref()
    }

    pub fn is_informational(&self) -> bool {
        self.action.is_none()
    }
}

/// Follow-up workflows an action can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScreenKind {
    SendPayment,
    ReviewPaymentRequest,
}

/// A request to show a follow-up screen, with the data that seeds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenRequest {
    SendPayment { uri: PaymentUri },
    ReviewPaymentRequest { request: Box<PaymentRequestData> },
}

impl ScreenRequest {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::SendPayment { .. } => ScreenKind::SendPayment,
            Self::ReviewPaymentRequest { .. } => ScreenKind::ReviewPaymentRequest,
        }
    }
}
