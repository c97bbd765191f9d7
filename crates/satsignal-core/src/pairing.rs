//! Model/view pairing.
//!
//! A [`ModelView`] owns a model and its presentation as one unit and keeps
//! both registered on the bus for as long as the pairing lives.

use std::sync::Arc;

use crate::bus::{EventBus, Subscriber, Subscription};

/// A model and view registered together on an [`EventBus`].
pub struct ModelView<M, V> {
    model: Arc<M>,
    view: Arc<V>,
    subscriptions: Vec<Subscription>,
}

impl<M, V> ModelView<M, V> {
    /// Bind `model` and `view` and register both on `bus`.
    ///
    /// The view is registered first so that, for any event, it has been
    /// notified before the model reacts and republishes.
    pub fn new<E>(model: M, view: V, bus: &EventBus<E>) -> Self
    where
        E: Send + Sync + 'static,
        M: Subscriber<E> + 'static,
        V: Subscriber<E> + 'static,
    {
        let model = Arc::new(model);
        let view = Arc::new(view);
        let subscriptions = vec![
            bus.subscribe(view.clone() as Arc<dyn Subscriber<E>>),
            bus.subscribe(model.clone() as Arc<dyn Subscriber<E>>),
        ];
        Self {
            model,
            view,
            subscriptions,
        }
    }

    /// The model; changes it publishes reach the view through the bus.
    pub fn model(&self) -> &Arc<M> {
        &self.model
    }

    /// The view, reflecting the model's state.
    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Unregister both halves and hand them back.
    pub fn detach(self) -> (Arc<M>, Arc<V>) {
        drop(self.subscriptions);
        (self.model, self.view)
    }
}
