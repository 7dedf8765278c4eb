//! The record store: durable persistence plus change fan-out.
//!
//! The whole collection is persisted as one JSON array under one namespaced
//! key, newest-first. Every mutation rewrites the full collection and then
//! broadcasts it to all subscribers. Deliberately not an incremental store:
//! a personal study log stays small, and a single snapshot keeps every read
//! and write trivially consistent.

use crate::error::Result;
use crate::storage::{FileStorage, Storage};
use crate::subscriptions::{Listener, SubscriptionId, SubscriptionManager};
use crate::types::WrongQuestionRecord;
use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Namespaced key the collection is persisted under.
pub const STORAGE_KEY: &str = "loop::wrong-questions";

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base directory for persisted data.
    pub path: PathBuf,

    /// Key the collection is stored under.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./loop-data"),
            key: STORAGE_KEY.to_string(),
        }
    }
}

/// Durable store for the wrong-question collection.
///
/// Records are immutable once saved; the only operations are `list`, `save`
/// (prepend) and `clear`. The store owns the persistence layer exclusively
/// and is the single writer of the collection.
pub struct RecordStore {
    storage: Box<dyn Storage>,
    key: String,
    subscriptions: SubscriptionManager,

    /// Serializes the read-modify-write-notify sequence of `save`/`clear`.
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Open a file-backed store.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let storage = FileStorage::open(&config.path)?;
        Ok(Self::with_storage(Box::new(storage), config.key))
    }

    /// Build a store on top of an arbitrary storage backend.
    pub fn with_storage(storage: Box<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            subscriptions: SubscriptionManager::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the full persisted collection, newest-first.
    ///
    /// Returns an empty collection when nothing has been persisted yet, or
    /// when the persisted payload fails to parse: losing one read beats
    /// surfacing corruption as a crash. I/O failures still propagate.
    pub fn list(&self) -> Result<Vec<WrongQuestionRecord>> {
        let value = match self.storage.get(&self.key)? {
            Some(value) => value,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&value) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to parse stored records");
                Ok(Vec::new())
            }
        }
    }

    /// Prepend a record, persist the full collection, and notify subscribers.
    ///
    /// Returns the saved record. Persistence failures propagate without
    /// retry; nothing is broadcast on failure.
    pub fn save(&self, record: WrongQuestionRecord) -> Result<WrongQuestionRecord> {
        let _lock = self.write_lock.lock();

        let saved = record.clone();
        let mut records = self.list()?;
        records.insert(0, record);

        let payload = serde_json::to_string(&records)?;
        self.storage.set(&self.key, &payload)?;

        debug!(id = %saved.id, total = records.len(), "record saved");
        self.subscriptions.broadcast(&records);

        Ok(saved)
    }

    /// Remove the persisted collection and notify subscribers with an empty
    /// collection.
    pub fn clear(&self) -> Result<()> {
        let _lock = self.write_lock.lock();

        self.storage.remove(&self.key)?;

        debug!(key = %self.key, "collection cleared");
        self.subscriptions.broadcast(&[]);

        Ok(())
    }

    /// Register a listener invoked synchronously with the full updated
    /// collection on every `save`/`clear`.
    ///
    /// The callback runs while the store's write lock is held: it must not
    /// call `save` or `clear` on this store.
    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.subscriptions.subscribe(listener)
    }

    /// Deregister a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{build_record, Draft};
    use crate::types::Difficulty;
    use chrono::Utc;
    use parking_lot::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> RecordStore {
        RecordStore::open(StoreConfig {
            path: dir.path().join("store"),
            key: STORAGE_KEY.to_string(),
        })
        .unwrap()
    }

    fn make_record(subject: &str) -> WrongQuestionRecord {
        let draft = Draft {
            subject: subject.into(),
            topic: "主题".into(),
            question: "题目".into(),
            student_answer: "答案".into(),
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        build_record(&draft, Utc::now()).unwrap()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_prepends() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let first = store.save(make_record("数学")).unwrap();
        let second = store.save(make_record("英语")).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);
    }

    #[test]
    fn test_save_grows_by_one() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        for i in 0..5 {
            assert_eq!(store.list().unwrap().len(), i);
            let saved = store.save(make_record("物理")).unwrap();
            let records = store.list().unwrap();
            assert_eq!(records.len(), i + 1);
            assert_eq!(records[0].id, saved.id);
        }
    }

    #[test]
    fn test_clear_empties_and_notifies() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.save(make_record("化学")).unwrap();

        let notified = Arc::new(RwLock::new(None));
        let notified_clone = Arc::clone(&notified);
        store.subscribe(Box::new(move |records| {
            *notified_clone.write() = Some(records.to_vec());
        }));

        store.clear().unwrap();

        assert!(store.list().unwrap().is_empty());
        let notified = notified.read();
        assert!(notified.as_ref().is_some_and(|records| records.is_empty()));
    }

    #[test]
    fn test_clear_on_empty_store_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_subscribers_get_full_collection_on_save() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let seen: Arc<RwLock<Vec<Vec<WrongQuestionRecord>>>> = Arc::new(RwLock::new(Vec::new()));
        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            store.subscribe(Box::new(move |records| {
                seen.write().push(records.to_vec());
            }));
        }

        let saved = store.save(make_record("生物")).unwrap();

        let seen = seen.read();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0][0].id, saved.id);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let id = store.subscribe(Box::new(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(store.subscriber_count(), 1);

        store.save(make_record("地理")).unwrap();
        assert!(store.unsubscribe(id));
        store.save(make_record("历史")).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_collection_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store");

        let saved = {
            let store = RecordStore::open(StoreConfig {
                path: path.clone(),
                key: STORAGE_KEY.to_string(),
            })
            .unwrap();
            store.save(make_record("政治")).unwrap()
        };

        let store = RecordStore::open(StoreConfig {
            path,
            key: STORAGE_KEY.to_string(),
        })
        .unwrap();
        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], saved);
    }

    #[test]
    fn test_stores_do_not_share_subscribers() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        let store_a = test_store(&dir_a);
        let store_b = test_store(&dir_b);

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        store_a.subscribe(Box::new(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        }));

        store_b.save(make_record("数学")).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
