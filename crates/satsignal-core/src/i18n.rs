// ── Localization ──
//
// Message templates keyed by snake_case names with `{0}`, `{1}`, ...
// positional placeholders. Lookups never fail: an unknown key degrades
// to the generic `unknown_message` text and a missing argument to an
// empty string.

use std::collections::HashMap;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;

/// Text lookup used by every formatter in this crate.
pub trait Localizer: Send + Sync {
    /// Resolve `key` and interpolate `args`. Must never fail.
    fn text(&self, key: &str, args: &[String]) -> String;

    /// Typed convenience over [`Localizer::text`].
    fn message(&self, key: MessageKey, args: &[String]) -> String {
        self.text(key.as_ref(), args)
    }
}

/// Keys for every message the alert layer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKey {
    // Incoming payment URIs
    BitcoinUriAlert,
    BitcoinUriAlertLabelled,
    UnspecifiedAmount,

    // Payment-protocol sessions
    PaymentRequestAlert,
    PaymentRequestAlertNoMemo,
    UnknownMerchant,
    PaymentRequestTrusted,
    PaymentRequestUntrusted,
    PaymentRequestUnverifiable,
    PaymentRequestAlmostExpired,
    PaymentRequestExpired,
    PaymentRequestDown,
    PaymentRequestError,

    // Transactions
    PaymentReceivedAlert,
    TransactionSeenAlert,

    // Hardware wallets
    HardwareAttachedAlert,
    HardwareFailureAlert,

    // Fallback
    UnknownMessage,
}

impl MessageKey {
    /// Built-in English template.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::BitcoinUriAlert => "Do you want to send {0} to {1}?",
            Self::BitcoinUriAlertLabelled => "Do you want to send {0} to \"{1}\" ({2})?",
            Self::UnspecifiedAmount => "an unspecified amount",
            Self::PaymentRequestAlert => "Payment request from {0} for {1}: {2}",
            Self::PaymentRequestAlertNoMemo => "Payment request from {0} for {1}",
            Self::UnknownMerchant => "an unidentified merchant",
            Self::PaymentRequestTrusted => "The payment request is signed by {0}",
            Self::PaymentRequestUntrusted => "The payment request signature is not trusted: {0}",
            Self::PaymentRequestUnverifiable => {
                "The identity behind this payment request could not be verified"
            }
            Self::PaymentRequestAlmostExpired => "The payment request expires soon",
            Self::PaymentRequestExpired => "The payment request has expired",
            Self::PaymentRequestDown => "The payment request server could not be reached: {0}",
            Self::PaymentRequestError => "The payment request could not be processed: {0}",
            Self::PaymentReceivedAlert => "Payment of {0} received",
            Self::TransactionSeenAlert => "Transaction {0} seen on the network",
            Self::HardwareAttachedAlert => {
                "Your hardware wallet \"{0}\" is attached. Do you want to switch to it?"
            }
            Self::HardwareFailureAlert => {
                "Your hardware wallet has failed. Please detach it and try again."
            }
            Self::UnknownMessage => "No further information is available",
        }
    }
}

/// Message catalog with built-in English defaults and per-key overrides.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            overrides: HashMap::new(),
        }
    }

    /// Replace templates for the given keys. Keys need not be known
    /// [`MessageKey`]s: resolvers may hand out their own.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Template for `key`, if one exists.
    pub fn template(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str).or_else(|| {
            key.parse::<MessageKey>()
                .ok()
                .map(MessageKey::default_template)
        })
    }

    /// Every known key with its effective template, in declaration order.
    pub fn entries(&self) -> Vec<(MessageKey, &str)> {
        MessageKey::iter()
            .map(|key| {
                let template = self
                    .overrides
                    .get(key.as_ref())
                    .map_or_else(|| key.default_template(), String::as_str);
                (key, template)
            })
            .collect()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Localizer for MessageCatalog {
    fn text(&self, key: &str, args: &[String]) -> String {
        if let Some(template) = self.template(key) {
            return interpolate(template, args);
        }
        warn!(key, "unknown message key, using generic text");
        let fallback = self
            .template(MessageKey::UnknownMessage.as_ref())
            .unwrap_or_else(|| MessageKey::UnknownMessage.default_template());
        interpolate(fallback, args)
    }
}

/// Replace `{n}` placeholders with `args[n]`. Out-of-range placeholders
/// become empty; anything that is not a placeholder is copied verbatim.
pub fn interpolate(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|idx| (idx, close)));
        match placeholder {
            Some((idx, close)) => {
                if let Some(arg) = args.get(idx) {
                    out.push_str(arg);
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
