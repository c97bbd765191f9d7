// ── Incoming payment URIs (BIP21) ──
//
// `bitcoin:<address>?amount=<btc>&label=<text>&message=<text>&r=<url>`
//
// A structurally valid URI may still be semantically empty (no address,
// no amount). Decoding succeeds in that case; deciding whether to alert
// is the correlator's job, not the decoder's.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::amount::{Amount, AmountError};

const SCHEME: &str = "bitcoin";

/// Address length bounds covering base58 (P2PKH/P2SH) and bech32/bech32m.
const MIN_ADDRESS_LEN: usize = 26;
const MAX_ADDRESS_LEN: usize = 90;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("URI is empty")]
    Empty,

    #[error("not a URI: {0}")]
    Malformed(String),

    #[error("expected the 'bitcoin:' scheme, got '{0}:'")]
    WrongScheme(String),

    #[error("'{0}' is not a bitcoin address")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("invalid payment request URL '{url}': {reason}")]
    InvalidPaymentRequestUrl { url: String, reason: String },

    #[error("unsupported required parameter '{0}'")]
    UnsupportedRequirement(String),
}

/// A decoded `bitcoin:` URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUri {
    /// Destination address.
    pub address: Option<String>,
    /// Requested amount.
    pub amount: Option<Amount>,
    /// Label for the recipient.
    pub label: Option<String>,
    /// Free-form message describing the payment.
    pub message: Option<String>,
    /// BIP72 `r=` pointer to a payment-protocol request.
    pub payment_request_url: Option<Url>,
}

impl PaymentUri {
    /// Decode a raw `bitcoin:` URI.
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(UriError::Empty);
        }

        let url = Url::parse(raw).map_err(|e| UriError::Malformed(e.to_string()))?;
        if !url.scheme().eq_ignore_ascii_case(SCHEME) {
            return Err(UriError::WrongScheme(url.scheme().into()));
        }

        // `bitcoin:addr` puts the address in the path; some wallets emit
        // `bitcoin://addr`, which parses it as a host instead.
        let target = match url.host_str() {
            Some(host) if url.path().trim_matches('/').is_empty() => host.to_owned(),
            _ => url.path().trim_matches('/').to_owned(),
        };
        let address = if target.is_empty() {
            None
        } else {
            Some(validate_address(&target)?)
        };

        let mut uri = Self {
            address,
            ..Self::default()
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "amount" => uri.amount = Some(Amount::parse_btc(&value)?),
                "label" => uri.label = non_empty(&value),
                "message" => uri.message = non_empty(&value),
                "r" => {
                    let request_url =
                        Url::parse(&value).map_err(|e| UriError::InvalidPaymentRequestUrl {
                            url: value.to_string(),
                            reason: e.to_string(),
                        })?;
                    uri.payment_request_url = Some(request_url);
                }
                other if other.starts_with("req-") => {
                    return Err(UriError::UnsupportedRequirement(other.into()));
                }
                other => {
                    tracing::debug!(parameter = other, "ignoring unknown BIP21 parameter");
                }
            }
        }

        Ok(uri)
    }

    /// Whether the URI names somewhere to send funds.
    pub fn has_destination(&self) -> bool {
        self.address.is_some()
    }

    /// Whether the URI carries nothing a payment could be built from.
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.amount.is_none() && self.payment_request_url.is_none()
    }
}

fn validate_address(candidate: &str) -> Result<String, UriError> {
    let well_formed = (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&candidate.len())
        && candidate.bytes().all(|b| b.is_ascii_alphanumeric());
    if well_formed {
        Ok(candidate.to_owned())
    } else {
        Err(UriError::InvalidAddress(candidate.to_owned()))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
