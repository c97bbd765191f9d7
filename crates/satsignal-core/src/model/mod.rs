// ── Domain model ──
//
// Inputs (domain events produced by external decoders, resolvers and the
// device layer) and outputs (alert records, deferred actions and the UI
// notifications they fire). Everything here is plain data: serializable,
// cloneable, free of behaviour beyond construction and formatting.

pub mod alert;
pub mod amount;
pub mod event;
pub mod hardware;
pub mod payment;
pub mod severity;
pub mod transaction;
pub mod uri;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use satsignal_core::model::*` gives you everything.

// Severity
pub use severity::Severity;

// Money
pub use amount::{Amount, AmountError};

// Alerts and their actions
pub use alert::{AlertAction, AlertRecord, ScreenKind, ScreenRequest};

// Payment inputs and records
pub use payment::{PaymentDetails, PaymentRequestData, PaymentSessionSummary, TrustStatus};
pub use uri::{PaymentUri, UriError};

// Transactions
pub use transaction::TransactionSeenEvent;

// Hardware wallets
pub use hardware::{Features, HardwareEventType, HardwareWalletEvent};

// Event envelopes
pub use event::{DomainEvent, UiEvent};
