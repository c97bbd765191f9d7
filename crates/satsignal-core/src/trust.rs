// ── Payment-protocol trust evaluation ──
//
// Formatting only: the cryptographic and certificate checks happen in the
// resolver that produced the summary. The status passes through untouched.

use serde::{Deserialize, Serialize};

use crate::i18n::{Localizer, MessageKey};
use crate::model::{PaymentSessionSummary, TrustStatus};

/// Trust classification plus a localized explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAssessment {
    pub status: TrustStatus,
    pub reason: String,
}

/// Turns a session summary into a [`TrustAssessment`].
pub struct TrustEvaluator<'a> {
    localizer: &'a dyn Localizer,
}

impl<'a> TrustEvaluator<'a> {
    pub fn new(localizer: &'a dyn Localizer) -> Self {
        Self { localizer }
    }

    /// Localize the resolver's explanation, falling back to a stock reason
    /// for the status when the resolver gave no message key.
    pub fn evaluate(&self, summary: &PaymentSessionSummary) -> TrustAssessment {
        let reason = match summary.message_key.as_deref() {
            Some(key) => self.localizer.text(key, &summary.message_data),
            None => self
                .localizer
                .message(default_reason_key(summary.status), &summary.message_data),
        };
        TrustAssessment {
            status: summary.status,
            reason,
        }
    }
}

fn default_reason_key(status: TrustStatus) -> MessageKey {
    match status {
        TrustStatus::Trusted => MessageKey::PaymentRequestTrusted,
        TrustStatus::Untrusted => MessageKey::PaymentRequestUntrusted,
        TrustStatus::Unverifiable => MessageKey::PaymentRequestUnverifiable,
        TrustStatus::AlmostExpired => MessageKey::PaymentRequestAlmostExpired,
        TrustStatus::Expired => MessageKey::PaymentRequestExpired,
        TrustStatus::Down => MessageKey::PaymentRequestDown,
        TrustStatus::Error => MessageKey::PaymentRequestError,
    }
}
