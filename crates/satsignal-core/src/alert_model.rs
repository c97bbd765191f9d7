// ── Current-alert model ──
//
// Tracks the alert currently offered to the user. Whether alerts queue or
// replace one another is a presentation policy; this model keeps the most
// recently added one and clears it on `RemoveAlert`.

use tokio::sync::watch;
use tracing::debug;

use crate::bus::Subscriber;
use crate::model::{AlertRecord, UiEvent};

pub struct AlertModel {
    current: watch::Sender<Option<AlertRecord>>,
}

impl AlertModel {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    /// The alert currently shown, if any.
    pub fn current(&self) -> Option<AlertRecord> {
        self.current.borrow().clone()
    }

    /// Observe changes to the current alert.
    pub fn subscribe(&self) -> watch::Receiver<Option<AlertRecord>> {
        self.current.subscribe()
    }
}

impl Default for AlertModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber<UiEvent> for AlertModel {
    fn on_event(&self, event: &UiEvent) {
        match event {
            UiEvent::AlertAdded(alert) => {
                debug!(alert = %alert.id(), severity = %alert.severity(), "alert shown");
                self.current.send_replace(Some(alert.clone()));
            }
            UiEvent::RemoveAlert => {
                // Observers wake only if an alert was actually showing.
                self.current.send_if_modified(|current| current.take().is_some());
            }
            UiEvent::WalletDetailChanged
            | UiEvent::SwitchWalletRequested
            | UiEvent::ScreenRequested(_) => {}
        }
    }
}
