// ── Reactive record collection ──
//
// Concurrent storage keyed by UUID with push-based change notification
// via `watch` channels. Snapshots preserve first-insertion order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;
use uuid::Uuid;

struct Slot<T> {
    seq: u64,
    record: Arc<T>,
}

/// A concurrent, reactive collection of records of one type.
///
/// Every mutation bumps a version counter and rebuilds the snapshot that
/// subscribers receive.
pub(crate) struct RecordCollection<T: Send + Sync + 'static> {
    by_id: DashMap<Uuid, Slot<T>>,

    /// Insertion sequence, so snapshots list records in arrival order.
    next_seq: AtomicU64,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> RecordCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            next_seq: AtomicU64::new(0),
            version,
            snapshot,
        }
    }

    /// Insert or replace a record. Returns `true` if the id was new.
    /// A replaced record keeps its original position.
    pub(crate) fn upsert(&self, id: Uuid, record: T) -> bool {
        let record = Arc::new(record);
        let is_new = match self.by_id.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().record = record;
                false
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot { seq, record });
                true
            }
        };

        self.rebuild_snapshot();
        self.bump_version();

        is_new
    }

    pub(crate) fn get(&self, id: &Uuid) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(&r.value().record))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Remove all records.
    pub(crate) fn clear(&self) {
        if self.by_id.is_empty() {
            return;
        }
        self.by_id.clear();
        self.rebuild_snapshot();
        self.bump_version();
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all records in insertion order and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_id
            .iter()
            .map(|r| (r.value().seq, Arc::clone(&r.value().record)))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        let values: Vec<Arc<T>> = slots.into_iter().map(|(_, record)| record).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
