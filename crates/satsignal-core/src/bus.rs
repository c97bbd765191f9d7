// ── In-process event bus ──
//
// Synchronous publish/subscribe. Every published event is delivered, in
// publish order, to every current subscriber, in registration order.
// An event published from inside `on_event` is queued on the publishing
// thread and delivered once the event being dispatched has reached every
// subscriber. Registration is explicit and returns a `Subscription`
// handle; dropping the handle unregisters the subscriber.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};

use indexmap::IndexMap;
use tracing::{debug, trace};

/// Anything that wants to observe events of type `E`.
pub trait Subscriber<E>: Send + Sync {
    fn on_event(&self, event: &E);
}

impl<E, F> Subscriber<E> for F
where
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        self(event);
    }
}

struct Registry<E> {
    next_id: AtomicU64,
    subscribers: RwLock<IndexMap<u64, Arc<dyn Subscriber<E>>>>,
    /// Events awaiting delivery, per dispatching thread. A thread has an
    /// entry exactly while it is inside `publish`.
    pending: Mutex<HashMap<ThreadId, VecDeque<E>>>,
}

impl<E> Registry<E> {
    fn pending(&self) -> MutexGuard<'_, HashMap<ThreadId, VecDeque<E>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ends a thread's dispatch, even if a subscriber panics.
struct Dispatching<'a, E> {
    registry: &'a Registry<E>,
    thread: ThreadId,
}

impl<E> Drop for Dispatching<'_, E> {
    fn drop(&mut self) {
        self.registry.pending().remove(&self.thread);
    }
}

trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64);
}

impl<E: Send + 'static> Unsubscribe for Registry<E> {
    fn unsubscribe(&self, id: u64) {
        let removed = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(&id)
            .is_some();
        if removed {
            debug!(subscription = id, "unsubscribed from event bus");
        }
    }
}

/// Cheaply cloneable handle to a shared bus.
pub struct EventBus<E> {
    registry: Arc<Registry<E>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: Send + Sync + 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(1),
                subscribers: RwLock::new(IndexMap::new()),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Register a subscriber. It receives every event published until the
    /// returned handle is dropped or [`Subscription::cancel`]led.
    #[must_use = "dropping the subscription unregisters the subscriber"]
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber<E>>) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, subscriber);
        debug!(subscription = id, "subscribed to event bus");

        let registry: Arc<dyn Unsubscribe> = self.registry.clone();
        Subscription {
            id,
            registry: Some(Arc::downgrade(&registry)),
        }
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// Called from inside a subscriber, the event is queued behind the one
    /// being dispatched and this returns immediately; the outermost call
    /// drains the queue in FIFO order. Subscribers may also subscribe or
    /// unsubscribe from within `on_event` without deadlocking.
    pub fn publish(&self, event: E) {
        let registry = self.registry.as_ref();
        let thread = thread::current().id();
        {
            let mut pending = registry.pending();
            if let Some(queue) = pending.get_mut(&thread) {
                trace!(queued = queue.len() + 1, "queued reentrant event");
                queue.push_back(event);
                return;
            }
            pending.insert(thread, VecDeque::new());
        }
        let _dispatching = Dispatching { registry, thread };

        let mut next = Some(event);
        while let Some(event) = next {
            self.deliver(&event);
            next = registry
                .pending()
                .get_mut(&thread)
                .and_then(VecDeque::pop_front);
        }
    }

    fn deliver(&self, event: &E) {
        let subscribers: Vec<Arc<dyn Subscriber<E>>> = self
            .registry
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        trace!(subscribers = subscribers.len(), "publishing event");
        for subscriber in subscribers {
            subscriber.on_event(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<E: Send + Sync + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration handle returned by [`EventBus::subscribe`].
///
/// Unregisters on drop. Outliving the bus is harmless.
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Unregister now rather than at drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.registry.is_some())
            .finish()
    }
}
