// ── Collaborator ports ──
//
// What deferred actions need from the rest of the application. The crate
// ships an in-memory wallet service (`store::InMemoryWalletService`) and
// lets the UI bus double as the screen requester.

use crate::bus::EventBus;
use crate::model::{PaymentRequestData, ScreenRequest, UiEvent};

/// Access to the currently open wallet.
pub trait WalletService: Send + Sync {
    fn current_wallet_is_open(&self) -> bool;

    /// Take ownership of a payment request the user chose to keep.
    fn store_payment_request(&self, request: PaymentRequestData);
}

/// Fire-and-forget request for a follow-up workflow.
pub trait ScreenRequester: Send + Sync {
    fn request_screen(&self, request: ScreenRequest);
}

impl ScreenRequester for EventBus<UiEvent> {
    fn request_screen(&self, request: ScreenRequest) {
        self.publish(UiEvent::ScreenRequested(request));
    }
}
