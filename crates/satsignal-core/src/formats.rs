//! Alert message formatting.
//!
//! Each formatter answers `None` when the input does not carry enough
//! information to be worth showing the user.

use crate::i18n::{Localizer, MessageKey};
use crate::model::{PaymentSessionSummary, PaymentUri, TransactionSeenEvent};

/// Message for an incoming payment URI, or `None` without a destination.
pub fn alert_message_for_uri(uri: &PaymentUri, localizer: &dyn Localizer) -> Option<String> {
    let address = uri.address.as_deref()?;

    let amount = uri.amount.map_or_else(
        || localizer.message(MessageKey::UnspecifiedAmount, &[]),
        |a| a.to_string(),
    );

    let message = match uri.label.as_deref() {
        Some(label) => localizer.message(
            MessageKey::BitcoinUriAlertLabelled,
            &[amount, label.to_owned(), address.to_owned()],
        ),
        None => localizer.message(MessageKey::BitcoinUriAlert, &[amount, address.to_owned()]),
    };
    Some(message)
}

/// Message for a payment-protocol session.
///
/// With a session the message describes the request. Without one, the
/// resolver's explanation is shown if it gave one; otherwise `None`.
pub fn alert_message_for_session(
    summary: &PaymentSessionSummary,
    localizer: &dyn Localizer,
) -> Option<String> {
    let Some(details) = summary.session.as_ref() else {
        return summary
            .message_key
            .as_deref()
            .map(|key| localizer.text(key, &summary.message_data));
    };

    let merchant = details
        .identity_display_name
        .clone()
        .or_else(|| {
            details
                .payment_url
                .as_ref()
                .and_then(|u| u.host_str().map(str::to_owned))
        })
        .unwrap_or_else(|| localizer.message(MessageKey::UnknownMerchant, &[]));
    let amount = details.amount.map_or_else(
        || localizer.message(MessageKey::UnspecifiedAmount, &[]),
        |a| a.to_string(),
    );

    let message = match details.memo.as_deref() {
        Some(memo) => localizer.message(
            MessageKey::PaymentRequestAlert,
            &[merchant, amount, memo.to_owned()],
        ),
        None => localizer.message(MessageKey::PaymentRequestAlertNoMemo, &[merchant, amount]),
    };
    Some(message)
}

/// Message for a transaction sighting. Always present.
pub fn alert_message_for_transaction(
    event: &TransactionSeenEvent,
    localizer: &dyn Localizer,
) -> String {
    if event.amount.is_positive() {
        localizer.message(MessageKey::PaymentReceivedAlert, &[event.amount.to_string()])
    } else {
        localizer.message(MessageKey::TransactionSeenAlert, &[event.short_id()])
    }
}
