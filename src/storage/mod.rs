//! Key-value persistence backends.
//!
//! The store persists the whole collection as one serialized value under one
//! namespaced key. The [`Storage`] trait is that key-value seam; [`FileStorage`]
//! is the production implementation. Tests inject failing backends to exercise
//! write-error paths.

mod file;

pub use file::FileStorage;

use crate::error::Result;

/// Durable string-keyed storage.
///
/// I/O failures propagate as errors; a missing key is `Ok(None)`, never an
/// error.
pub trait Storage: Send + Sync {
    /// Read the value for a key, if present.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key. Must be atomic from a reader's perspective:
    /// a concurrent or subsequent `get` sees either the old value or the new
    /// one, never a partial write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value for a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
