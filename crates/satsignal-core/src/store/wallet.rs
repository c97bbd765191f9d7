use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use super::collection::RecordCollection;
use crate::model::PaymentRequestData;
use crate::services::WalletService;

/// Identity of an open wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub id: Uuid,
    pub label: String,
}

impl WalletSummary {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }
}

/// Wallet service keeping everything in process memory.
///
/// Payment requests belong to the open wallet and are dropped when it
/// closes.
pub struct InMemoryWalletService {
    current: watch::Sender<Option<WalletSummary>>,
    payment_requests: RecordCollection<PaymentRequestData>,
}

impl InMemoryWalletService {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current,
            payment_requests: RecordCollection::new(),
        }
    }

    /// Start with `wallet` already open.
    pub fn with_open_wallet(wallet: WalletSummary) -> Self {
        let service = Self::new();
        service.open_wallet(wallet);
        service
    }

    pub fn open_wallet(&self, wallet: WalletSummary) {
        info!(wallet = %wallet.id, label = %wallet.label, "wallet opened");
        self.current.send_replace(Some(wallet));
    }

    /// Close the current wallet. Returns it if one was open.
    pub fn close_wallet(&self) -> Option<WalletSummary> {
        let closed = self.current.send_replace(None);
        if let Some(wallet) = &closed {
            info!(wallet = %wallet.id, "wallet closed");
            self.payment_requests.clear();
        }
        closed
    }

    pub fn current_wallet(&self) -> Option<WalletSummary> {
        self.current.borrow().clone()
    }

    /// Observe wallet open/close transitions.
    pub fn subscribe_wallet(&self) -> watch::Receiver<Option<WalletSummary>> {
        self.current.subscribe()
    }

    /// Stored payment requests, oldest first.
    pub fn payment_requests(&self) -> Arc<Vec<Arc<PaymentRequestData>>> {
        self.payment_requests.snapshot()
    }

    pub fn payment_request(&self, id: &Uuid) -> Option<Arc<PaymentRequestData>> {
        self.payment_requests.get(id)
    }

    pub fn payment_request_count(&self) -> usize {
        self.payment_requests.len()
    }

    pub fn subscribe_payment_requests(&self) -> watch::Receiver<Arc<Vec<Arc<PaymentRequestData>>>> {
        self.payment_requests.subscribe()
    }

    /// Number of payment-request mutations since creation.
    pub fn payment_requests_version(&self) -> u64 {
        self.payment_requests.version()
    }
}

impl Default for InMemoryWalletService {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletService for InMemoryWalletService {
    fn current_wallet_is_open(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn store_payment_request(&self, request: PaymentRequestData) {
        let id = request.uuid;
        let is_new = self.payment_requests.upsert(id, request);
        debug!(request = %id, is_new, "payment request stored");
    }
}
