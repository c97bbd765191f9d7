// ── Payment-protocol sessions and persisted payment requests ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use url::Url;
use uuid::Uuid;

use super::amount::Amount;
use super::severity::Severity;

/// Outcome of verifying a payment-protocol request, as determined by the
/// resolver. The alert layer only formats it, never re-derives it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrustStatus {
    /// Signed by a certificate chaining to a trusted root; identity known.
    Trusted,
    /// Signed, but the chain or signature failed validation.
    Untrusted,
    /// Unsigned, or signed in a way that cannot be checked.
    Unverifiable,
    /// Valid but close to its expiry time.
    AlmostExpired,
    /// Past its expiry time.
    Expired,
    /// The payment request server could not be reached.
    Down,
    /// The response was not a usable payment request.
    Error,
}

impl TrustStatus {
    pub fn is_trusted(self) -> bool {
        matches!(self, Self::Trusted)
    }

    /// Severity a renderer may use to decorate the trust reason.
    pub fn severity_hint(self) -> Severity {
        match self {
            Self::Trusted => Severity::Green,
            Self::Unverifiable | Self::AlmostExpired => Severity::Amber,
            Self::Untrusted | Self::Expired | Self::Down | Self::Error => Severity::Red,
        }
    }
}

/// What a resolved payment-protocol session describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub memo: Option<String>,
    pub amount: Option<Amount>,
    /// Display name of the verified (or claimed) merchant identity.
    pub identity_display_name: Option<String>,
    pub payment_url: Option<Url>,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
}

/// Result of following a payment-protocol pointer.
///
/// `session` is present when a payment request was obtained (whether or
/// not it could be trusted). `message_key`/`message_data` carry the
/// resolver's explanation of the trust outcome as a localization key and
/// its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSessionSummary {
    pub status: TrustStatus,
    #[serde(default)]
    pub message_key: Option<String>,
    #[serde(default)]
    pub message_data: Vec<String>,
    #[serde(default)]
    pub session: Option<PaymentDetails>,
}

impl PaymentSessionSummary {
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

/// A payment request the user chose to keep, stored by the wallet service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestData {
    pub uuid: Uuid,
    /// Filled in once a transaction pays this request.
    pub transaction_hash: Option<String>,
    pub date: DateTime<Utc>,
    pub amount: Option<Amount>,
    pub memo: Option<String>,
    pub identity_display_name: Option<String>,
    pub payment_url: Option<Url>,
    pub expires: Option<DateTime<Utc>>,
    pub trust_status: TrustStatus,
    pub trust_error_message: String,
}

impl PaymentRequestData {
    /// Derive a storable record from a resolved session, stamped with the
    /// trust outcome.
    pub fn from_session(
        details: &PaymentDetails,
        trust_status: TrustStatus,
        trust_error_message: String,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            transaction_hash: None,
            date: details.created.unwrap_or_else(Utc::now),
            amount: details.amount,
            memo: details.memo.clone(),
            identity_display_name: details.identity_display_name.clone(),
            payment_url: details.payment_url.clone(),
            expires: details.expires,
            trust_status,
            trust_error_message,
        }
    }
}
