// ── Event correlator ──
//
// Decides, per domain event, whether to alert and with what. Correlation is
// synchronous and side-effect free: anything that touches wallets or
// screens is captured as an `AlertAction` value and runs only when the user
// invokes it (see `action.rs`).

use std::sync::Arc;

use tracing::debug;

use crate::device;
use crate::error::CoreError;
use crate::formats;
use crate::i18n::Localizer;
use crate::model::{
    AlertAction, AlertRecord, DomainEvent, HardwareWalletEvent, PaymentSessionSummary, PaymentUri,
    Severity, TransactionSeenEvent,
};

/// Stateless event-to-alert dispatcher.
#[derive(Clone)]
pub struct Correlator {
    localizer: Arc<dyn Localizer>,
}

// `from_*` names the event each method consumes, not a constructor.
#[allow(clippy::wrong_self_convention)]
impl Correlator {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self { localizer }
    }

    /// Correlate any domain event.
    ///
    /// `Ok(None)` means the event carried nothing worth alerting on. The
    /// only error is an unrecognized hardware event type.
    pub fn correlate(&self, event: &DomainEvent) -> Result<Option<AlertRecord>, CoreError> {
        let alert = match event {
            DomainEvent::PaymentUri(uri) => self.from_incoming_payment_uri(uri),
            DomainEvent::PaymentSession(summary) => self.from_payment_session_summary(summary),
            DomainEvent::TransactionSeen(tx) => Some(self.from_transaction_seen(tx)),
            DomainEvent::HardwareWallet(hw) => Some(self.from_hardware_device_event(hw)?),
        };
        debug!(
            event = event.name(),
            alerted = alert.is_some(),
            severity = ?alert.as_ref().map(AlertRecord::severity),
            "correlated domain event"
        );
        Ok(alert)
    }

    /// Alert offering to pay a scanned or pasted URI, or `None` when the
    /// URI has no destination.
    pub fn from_incoming_payment_uri(&self, uri: &PaymentUri) -> Option<AlertRecord> {
        let message = formats::alert_message_for_uri(uri, self.localizer.as_ref())?;
        Some(AlertRecord::with_action(
            message,
            Severity::Pink,
            AlertAction::SendPayment { uri: uri.clone() },
        ))
    }

    /// Alert offering to review a payment-protocol request, or `None` when
    /// the summary explains nothing.
    pub fn from_payment_session_summary(
        &self,
        summary: &PaymentSessionSummary,
    ) -> Option<AlertRecord> {
        let message = formats::alert_message_for_session(summary, self.localizer.as_ref())?;
        Some(AlertRecord::with_action(
            message,
            Severity::Pink,
            AlertAction::ReviewPaymentRequest {
                summary: Box::new(summary.clone()),
            },
        ))
    }

    /// Informational alert for a transaction sighting. Never absent.
    pub fn from_transaction_seen(&self, event: &TransactionSeenEvent) -> AlertRecord {
        AlertRecord::new(
            formats::alert_message_for_transaction(event, self.localizer.as_ref()),
            Severity::Green,
        )
    }

    /// Alert for a hardware wallet lifecycle event.
    pub fn from_hardware_device_event(
        &self,
        event: &HardwareWalletEvent,
    ) -> Result<AlertRecord, CoreError> {
        device::device_alert(event, self.localizer.as_ref())
    }
}
