// ── Hardware device lifecycle alerts ──
//
// Stateless: each event is classified on its own `event_type`. The match
// below lists every variant; a new `HardwareEventType` must be classified
// here before it compiles.

use tracing::{debug, error};

use crate::error::CoreError;
use crate::i18n::{Localizer, MessageKey};
use crate::model::{AlertAction, AlertRecord, HardwareEventType, HardwareWalletEvent, Severity};

/// Build the alert for a device event.
///
/// `ShowDeviceReady` offers to switch to the device's wallet;
/// `ShowDeviceFailed` reports the fault. Any other event type reaching
/// this layer is a wiring bug and is returned as
/// [`CoreError::UnrecognizedDeviceEvent`].
pub fn device_alert(
    event: &HardwareWalletEvent,
    localizer: &dyn Localizer,
) -> Result<AlertRecord, CoreError> {
    match event.event_type {
        HardwareEventType::ShowDeviceReady => {
            let label = event.label();
            debug!(label, "hardware wallet ready");
            Ok(AlertRecord::with_action(
                localizer.message(MessageKey::HardwareAttachedAlert, &[label.to_owned()]),
                Severity::Green,
                AlertAction::SwitchWallet,
            ))
        }
        HardwareEventType::ShowDeviceFailed => {
            debug!("hardware wallet failed");
            Ok(AlertRecord::new(
                localizer.message(MessageKey::HardwareFailureAlert, &[]),
                Severity::Red,
            ))
        }
        event_type @ (HardwareEventType::ShowDeviceDetached
        | HardwareEventType::ShowDeviceStopped
        | HardwareEventType::ShowPinEntry
        | HardwareEventType::ShowButtonPress
        | HardwareEventType::ShowOperationSucceeded
        | HardwareEventType::ShowOperationFailed
        | HardwareEventType::ProvideEntropy) => {
            error!(%event_type, "hardware wallet event reached the alert layer");
            Err(CoreError::UnrecognizedDeviceEvent { event_type })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::i18n::MessageCatalog;
    use crate::model::Features;
    use strum::IntoEnumIterator;

    #[test]
    fn ready_with_features_names_the_device() {
        let catalog = MessageCatalog::default();
        let event = HardwareWalletEvent::new(HardwareEventType::ShowDeviceReady).with_features(
            Features {
                label: "Aardvark".into(),
                vendor: Some("bitcointrezor.com".into()),
                ..Features::default()
            },
        );

        let alert = device_alert(&event, &catalog).unwrap();
        assert_eq!(alert.severity(), Severity::Green);
        assert_eq!(alert.action(), Some(&AlertAction::SwitchWallet));
        assert!(alert.message().contains("\"Aardvark\""));
    }

    #[test]
    fn ready_without_features_uses_empty_label() {
        let catalog = MessageCatalog::default();
        let event = HardwareWalletEvent::new(HardwareEventType::ShowDeviceReady);

        let alert = device_alert(&event, &catalog).unwrap();
        assert_eq!(alert.severity(), Severity::Green);
        assert!(alert.action().is_some());
        assert_eq!(
            alert.message(),
            "Your hardware wallet \"\" is attached. Do you want to switch to it?"
        );
    }

    #[test]
    fn failed_ignores_payload() {
        let catalog = MessageCatalog::default();
        let bare = HardwareWalletEvent::new(HardwareEventType::ShowDeviceFailed);
        let with_features = bare.clone().with_features(Features {
            label: "Aardvark".into(),
            ..Features::default()
        });

        for event in [bare, with_features] {
            let alert = device_alert(&event, &catalog).unwrap();
            assert_eq!(alert.severity(), Severity::Red);
            assert!(alert.is_informational());
            assert_eq!(
                alert.message(),
                MessageKey::HardwareFailureAlert.default_template()
            );
        }
    }

    #[test]
    fn every_other_event_type_is_rejected() {
        let catalog = MessageCatalog::default();
        let unrecognized = HardwareEventType::iter().filter(|t| {
            !matches!(
                t,
                HardwareEventType::ShowDeviceReady | HardwareEventType::ShowDeviceFailed
            )
        });

        for event_type in unrecognized {
            let err = device_alert(&HardwareWalletEvent::new(event_type), &catalog).unwrap_err();
            assert!(
                matches!(
                    err,
                    CoreError::UnrecognizedDeviceEvent { event_type: t } if t == event_type
                ),
                "expected rejection of {event_type}, got {err:?}"
            );
            assert!(err.is_contract_violation());
        }
    }
}
