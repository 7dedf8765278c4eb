//! Live read view over the record collection.

use crate::error::Result;
use crate::store::RecordStore;
use crate::subscriptions::SubscriptionId;
use crate::types::WrongQuestionRecord;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State shared between the view and its store listener.
struct ViewState {
    records: RwLock<Vec<WrongQuestionRecord>>,
    loading: AtomicBool,
    /// Set once a broadcast has been observed; the initial `list` result is
    /// discarded after that, so a mutation racing the attach never gets
    /// overwritten by the older read.
    saw_broadcast: AtomicBool,
}

/// Read-through cached view of the collection, kept live by subscribing to
/// the store.
///
/// On attach the view performs one `list()` read and registers with the
/// store, so any later `save`/`clear` (from this or any other session)
/// immediately updates the exposed collection. The subscription is
/// deregistered on drop.
pub struct RecordsView {
    store: Arc<RecordStore>,
    state: Arc<ViewState>,
    subscription: SubscriptionId,
}

impl RecordsView {
    /// Attach to a store: subscribe, then load the current collection.
    pub fn attach(store: Arc<RecordStore>) -> Result<Self> {
        let state = Arc::new(ViewState {
            records: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
            saw_broadcast: AtomicBool::new(false),
        });

        let listener_state = Arc::clone(&state);
        let subscription = store.subscribe(Box::new(move |records| {
            let mut cached = listener_state.records.write();
            *cached = records.to_vec();
            listener_state.saw_broadcast.store(true, Ordering::SeqCst);
            listener_state.loading.store(false, Ordering::SeqCst);
        }));

        let initial = match store.list() {
            Ok(records) => records,
            Err(e) => {
                store.unsubscribe(subscription);
                return Err(e);
            }
        };

        {
            // Same lock the listener writes through: either the broadcast
            // already landed (keep it, it is newer) or it lands after us.
            let mut cached = state.records.write();
            if !state.saw_broadcast.load(Ordering::SeqCst) {
                *cached = initial;
            }
        }
        state.loading.store(false, Ordering::SeqCst);

        Ok(Self {
            store,
            state,
            subscription,
        })
    }

    /// Snapshot of the most recent collection the store has emitted (or the
    /// initial load result if no mutation has happened yet). Newest-first.
    pub fn records(&self) -> Vec<WrongQuestionRecord> {
        self.state.records.read().clone()
    }

    /// True until the initial load has resolved.
    pub fn is_loading(&self) -> bool {
        self.state.loading.load(Ordering::SeqCst)
    }
}

impl Drop for RecordsView {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
