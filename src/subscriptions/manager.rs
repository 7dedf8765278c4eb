//! Subscription manager for broadcasting collection updates.

use crate::types::WrongQuestionRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback invoked with the full updated collection on every mutation.
pub type Listener = Box<dyn Fn(&[WrongQuestionRecord]) + Send + Sync>;

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Manages listeners and broadcasts collection snapshots.
///
/// Owned by each store instance rather than living in module-global state, so
/// independent stores (and tests) never share listeners.
pub struct SubscriptionManager {
    /// Active listeners by ID.
    listeners: RwLock<HashMap<SubscriptionId, Listener>>,

    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener. Returns the ID used to deregister it.
    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.write().insert(id, listener);
        id
    }

    /// Deregister a listener. Returns false if the ID was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.write().remove(&id).is_some()
    }

    /// Number of active listeners.
    pub fn count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Invoke every listener with the same collection snapshot.
    ///
    /// Delivery is synchronous and carries no cross-listener ordering
    /// guarantee. Listeners must not subscribe or unsubscribe from within
    /// the callback.
    pub fn broadcast(&self, records: &[WrongQuestionRecord]) {
        let listeners = self.listeners.read();
        for listener in listeners.values() {
            listener(records);
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
