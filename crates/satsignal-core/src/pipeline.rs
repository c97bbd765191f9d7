// ── Alert pipeline ──
//
// Correlates incoming domain events and announces resulting alerts on the
// UI bus.

use tracing::info;

use crate::bus::EventBus;
use crate::correlator::Correlator;
use crate::error::CoreError;
use crate::model::{AlertRecord, DomainEvent, UiEvent};

#[derive(Clone)]
pub struct AlertPipeline {
    correlator: Correlator,
    bus: EventBus<UiEvent>,
}

impl AlertPipeline {
    pub fn new(correlator: Correlator, bus: EventBus<UiEvent>) -> Self {
        Self { correlator, bus }
    }

    pub fn bus(&self) -> &EventBus<UiEvent> {
        &self.bus
    }

    /// Correlate `event` and publish [`UiEvent::AlertAdded`] if it raised
    /// an alert. Errors are returned before anything is published.
    pub fn handle(&self, event: &DomainEvent) -> Result<Option<AlertRecord>, CoreError> {
        let alert = self.correlator.correlate(event)?;
        if let Some(alert) = &alert {
            info!(
                alert = %alert.id(),
                severity = %alert.severity(),
                actionable = !alert.is_informational(),
                "raising alert"
            );
            self.bus.publish(UiEvent::AlertAdded(alert.clone()));
        }
        Ok(alert)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::alert_model::AlertModel;
    use crate::i18n::MessageCatalog;
    use crate::model::{HardwareEventType, HardwareWalletEvent, PaymentUri, Severity};

    fn pipeline() -> (AlertPipeline, Arc<AlertModel>, crate::bus::Subscription) {
        let bus = EventBus::<UiEvent>::new();
        let model = Arc::new(AlertModel::new());
        let sub = bus.subscribe(model.clone());
        let correlator = Correlator::new(Arc::new(MessageCatalog::default()));
        (AlertPipeline::new(correlator, bus), model, sub)
    }

    #[test]
    fn raised_alerts_reach_subscribers() {
        let (pipeline, model, _sub) = pipeline();
        let event = DomainEvent::HardwareWallet(HardwareWalletEvent::new(
            HardwareEventType::ShowDeviceFailed,
        ));

        let alert = pipeline.handle(&event).unwrap().unwrap();
        assert_eq!(alert.severity(), Severity::Red);
        assert_eq!(model.current(), Some(alert));
    }

    #[test]
    fn silent_and_failing_events_publish_nothing() {
        let (pipeline, model, _sub) = pipeline();

        let empty = DomainEvent::PaymentUri(PaymentUri::default());
        assert!(pipeline.handle(&empty).unwrap().is_none());

        let stray = DomainEvent::HardwareWallet(HardwareWalletEvent::new(
            HardwareEventType::ProvideEntropy,
        ));
        assert!(pipeline.handle(&stray).is_err());
        assert!(model.current().is_none());
    }
}
