// ── Core error types ──
//
// Errors surfaced by satsignal-core. Empty input and formatting
// degradation are not errors: the correlator answers "no alert" or falls
// back to default text. What remains here are contract breaches (a
// precondition the UI flow should have established, a device event the
// alert layer does not handle) and boundary decoding failures.

use thiserror::Error;

use crate::model::{HardwareEventType, UriError};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Contract violations ──────────────────────────────────────────
    #[error("No wallet is open: {action} requires an open wallet")]
    NoWalletOpen { action: &'static str },

    #[error("Unrecognized hardware wallet event: {event_type}")]
    UnrecognizedDeviceEvent { event_type: HardwareEventType },

    // ── Boundary errors ──────────────────────────────────────────────
    #[error("Invalid payment URI: {0}")]
    InvalidUri(#[from] UriError),

    #[error("Malformed domain event: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether this error signals a programming-contract breach rather than
    /// bad input. Callers treat these as bugs, never as user-facing
    /// conditions to retry.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::NoWalletOpen { .. } | Self::UnrecognizedDeviceEvent { .. }
        )
    }
}
