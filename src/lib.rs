//! # Loop Records
//!
//! Local-first capture of wrong exam questions with spaced review
//! scheduling: a student records a question they got wrong, self-assesses
//! its difficulty, and the store schedules a review date (harder questions
//! come back sooner).
//!
//! ## Core Concepts
//!
//! - **Records**: Immutable wrong-question entries, newest-first
//! - **Store**: Whole-collection snapshot persistence with change fan-out
//! - **Session**: Mutable form draft with validate-persist-reset submission
//! - **View**: Read-through cache kept live by store subscriptions
//!
//! ## Example
//!
//! ```ignore
//! use loop_records::{FormSession, RecordStore, RecordsView, StoreConfig, DraftField};
//! use std::sync::Arc;
//!
//! let store = Arc::new(RecordStore::open(StoreConfig::default())?);
//! let view = RecordsView::attach(Arc::clone(&store))?;
//!
//! let mut session = FormSession::new(Arc::clone(&store));
//! session.update_field(DraftField::Subject, "数学");
//! session.update_field(DraftField::Topic, "导数");
//! session.update_field(DraftField::Question, "求 f(x)=x^2 的导数");
//! session.update_field(DraftField::StudentAnswer, "x");
//! let record = session.submit()?;
//!
//! assert_eq!(view.records()[0].id, record.id);
//! ```

pub mod analysis;
pub mod error;
pub mod schema;
pub mod session;
pub mod storage;
pub mod store;
pub mod subscriptions;
pub mod types;
pub mod view;

// Re-exports
pub use analysis::{AnalysisError, AnalyzedQuestion, ImageAnalyzer};
pub use error::{Result, StoreError};
pub use schema::{build_record, parse_tags, Draft, DraftField};
pub use session::FormSession;
pub use storage::{FileStorage, Storage};
pub use store::{RecordStore, StoreConfig, STORAGE_KEY};
pub use subscriptions::{Listener, SubscriptionId, SubscriptionManager};
pub use types::{Difficulty, RecordId, RootCause, WrongQuestionRecord};
pub use view::RecordsView;
