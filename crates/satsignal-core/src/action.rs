// ── Deferred alert actions ──
//
// Runs the follow-up attached to an alert once the user invokes it. This is
// the only place where correlation results touch wallet state or request
// screens.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::error::CoreError;
use crate::i18n::Localizer;
use crate::model::{
    AlertAction, PaymentRequestData, PaymentSessionSummary, PaymentUri, ScreenRequest, UiEvent,
};
use crate::services::{ScreenRequester, WalletService};
use crate::trust::TrustEvaluator;

/// Executes [`AlertAction`]s against the application's collaborators.
#[derive(Clone)]
pub struct ActionExecutor {
    wallet: Arc<dyn WalletService>,
    localizer: Arc<dyn Localizer>,
    bus: EventBus<UiEvent>,
    screens: Arc<dyn ScreenRequester>,
}

impl ActionExecutor {
    /// Screen requests go out on `bus` as [`UiEvent::ScreenRequested`].
    pub fn new(
        wallet: Arc<dyn WalletService>,
        localizer: Arc<dyn Localizer>,
        bus: EventBus<UiEvent>,
    ) -> Self {
        let screens: Arc<dyn ScreenRequester> = Arc::new(bus.clone());
        Self {
            wallet,
            localizer,
            bus,
            screens,
        }
    }

    /// Route screen requests somewhere other than the bus.
    #[must_use]
    pub fn with_screen_requester(mut self, screens: Arc<dyn ScreenRequester>) -> Self {
        self.screens = screens;
        self
    }

    pub fn execute(&self, action: &AlertAction) -> Result<(), CoreError> {
        info!(action = action.name(), "executing alert action");
        match action {
            AlertAction::SendPayment { uri } => {
                self.send_payment(uri);
                Ok(())
            }
            AlertAction::ReviewPaymentRequest { summary } => self.review_payment_request(summary),
            AlertAction::SwitchWallet => {
                self.bus.publish(UiEvent::RemoveAlert);
                self.bus.publish(UiEvent::SwitchWalletRequested);
                Ok(())
            }
        }
    }

    fn send_payment(&self, uri: &PaymentUri) {
        self.bus.publish(UiEvent::RemoveAlert);
        self.screens
            .request_screen(ScreenRequest::SendPayment { uri: uri.clone() });
    }

    fn review_payment_request(&self, summary: &PaymentSessionSummary) -> Result<(), CoreError> {
        self.bus.publish(UiEvent::RemoveAlert);

        if !self.wallet.current_wallet_is_open() {
            warn!("payment request accepted with no wallet open");
            return Err(CoreError::NoWalletOpen {
                action: "review_payment_request",
            });
        }

        let Some(details) = &summary.session else {
            debug!(status = %summary.status, "no payment session to store");
            return Ok(());
        };

        let assessment = TrustEvaluator::new(self.localizer.as_ref()).evaluate(summary);
        let request =
            PaymentRequestData::from_session(details, assessment.status, assessment.reason);
        debug!(request = %request.uuid, status = %request.trust_status, "storing payment request");

        self.wallet.store_payment_request(request.clone());
        self.bus.publish(UiEvent::WalletDetailChanged);
        self.screens.request_screen(ScreenRequest::ReviewPaymentRequest {
            request: Box::new(request),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    use crate::bus::Subscription;
    use crate::i18n::MessageCatalog;
    use crate::model::{PaymentDetails, ScreenKind, TrustStatus};
    use crate::store::{InMemoryWalletService, WalletSummary};

    #[derive(Default)]
    struct Screens(Mutex<Vec<ScreenKind>>);

    impl ScreenRequester for Screens {
        fn request_screen(&self, request: ScreenRequest) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request.kind());
        }
    }

    fn record_names(bus: &EventBus<UiEvent>) -> (Arc<Mutex<Vec<&'static str>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = bus.subscribe(Arc::new(move |e: &UiEvent| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(e.name());
        }));
        (seen, sub)
    }

    fn session_summary() -> PaymentSessionSummary {
        PaymentSessionSummary {
            status: TrustStatus::Trusted,
            message_key: None,
            message_data: Vec::new(),
            session: Some(PaymentDetails {
                memo: Some("Invoice 7".into()),
                ..PaymentDetails::default()
            }),
        }
    }

    fn executor(wallet: Arc<InMemoryWalletService>, bus: &EventBus<UiEvent>) -> ActionExecutor {
        ActionExecutor::new(wallet, Arc::new(MessageCatalog::default()), bus.clone())
    }

    #[test]
    fn switch_wallet_dismisses_then_requests_switch() {
        let bus = EventBus::new();
        let (seen, _sub) = record_names(&bus);
        executor(Arc::new(InMemoryWalletService::new()), &bus)
            .execute(&AlertAction::SwitchWallet)
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            ["remove_alert", "switch_wallet_requested"]
        );
    }

    #[test]
    fn review_stores_and_requests_screen_through_custom_requester() {
        let bus = EventBus::new();
        let (seen, _sub) = record_names(&bus);
        let wallet = Arc::new(InMemoryWalletService::with_open_wallet(WalletSummary::new(
            "Main",
        )));
        let screens = Arc::new(Screens::default());

        executor(Arc::clone(&wallet), &bus)
            .with_screen_requester(screens.clone())
            .execute(&AlertAction::ReviewPaymentRequest {
                summary: Box::new(session_summary()),
            })
            .unwrap();

        assert_eq!(wallet.payment_request_count(), 1);
        let requests = wallet.payment_requests();
        let stored = &requests[0];
        assert_eq!(stored.trust_status, TrustStatus::Trusted);
        assert!(stored.trust_error_message.starts_with("The payment request is signed by"));
        assert_eq!(*seen.lock().unwrap(), ["remove_alert", "wallet_detail_changed"]);
        assert_eq!(*screens.0.lock().unwrap(), [ScreenKind::ReviewPaymentRequest]);
    }

    #[test]
    fn review_without_wallet_fails_after_dismissing() {
        let bus = EventBus::new();
        let (seen, _sub) = record_names(&bus);
        let wallet = Arc::new(InMemoryWalletService::new());

        let err = executor(Arc::clone(&wallet), &bus)
            .execute(&AlertAction::ReviewPaymentRequest {
                summary: Box::new(session_summary()),
            })
            .unwrap_err();

        assert!(err.is_contract_violation());
        assert_eq!(wallet.payment_request_count(), 0);
        assert_eq!(*seen.lock().unwrap(), ["remove_alert"]);
    }
}
