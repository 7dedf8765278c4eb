//! Subscription system for live collection updates.
//!
//! Every mutation of the store broadcasts the full updated collection to all
//! registered listeners, synchronously. There is no filtering and no
//! buffering: the collection is small by design, and each active screen
//! registers at most one listener.
//!
//! # Example
//!
//! ```ignore
//! let id = store.subscribe(Box::new(|records| {
//!     println!("{} records", records.len());
//! }));
//! // ...
//! store.unsubscribe(id);
//! ```

mod manager;

pub use manager::{Listener, SubscriptionId, SubscriptionManager};
