//! Alert correlation for wallet notifications.
//!
//! Turns domain events into user-facing alerts and runs the follow-up the
//! user picks:
//!
//! - **[`Correlator`]** decides, per [`DomainEvent`], whether to alert,
//!   with what message and [`Severity`], and which [`AlertAction`] to offer.
//!   It is synchronous and does no I/O.
//!
//! - **[`ActionExecutor`]** runs a deferred [`AlertAction`] against a
//!   [`WalletService`] and the UI [`EventBus`].
//!
//! - **[`EventBus`]** delivers [`UiEvent`]s synchronously in publish order.
//!   Subscribing returns a [`Subscription`] that unregisters on drop;
//!   [`ModelView`] keeps a model and its view registered together.
//!
//! - **[`InMemoryWalletService`]** tracks the open wallet and stores
//!   accepted payment requests in a reactive collection (`DashMap` plus
//!   `tokio::sync::watch` snapshots).

pub mod action;
pub mod alert_model;
pub mod bus;
pub mod correlator;
pub mod device;
pub mod error;
pub mod formats;
pub mod i18n;
pub mod model;
pub mod pairing;
pub mod pipeline;
pub mod services;
pub mod store;
pub mod trust;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::ActionExecutor;
pub use alert_model::AlertModel;
pub use bus::{EventBus, Subscriber, Subscription};
pub use correlator::Correlator;
pub use error::CoreError;
pub use i18n::{Localizer, MessageCatalog, MessageKey};
pub use pairing::ModelView;
pub use pipeline::AlertPipeline;
pub use services::{ScreenRequester, WalletService};
pub use store::{InMemoryWalletService, WalletSummary};
pub use trust::{TrustAssessment, TrustEvaluator};

pub use model::{
    AlertAction, AlertRecord, Amount, DomainEvent, Features, HardwareEventType,
    HardwareWalletEvent, PaymentDetails, PaymentRequestData, PaymentSessionSummary, PaymentUri,
    ScreenKind, ScreenRequest, Severity, TransactionSeenEvent, TrustStatus, UiEvent,
};
