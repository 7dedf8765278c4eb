//! File-backed key-value storage.

use crate::error::{Result, StoreError};
use crate::storage::Storage;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the lock file inside the storage directory.
const LOCK_FILE: &str = ".lock";

/// Directory-backed [`Storage`]: one file per key.
///
/// An exclusive lock file enforces the single-writer assumption; a second
/// process opening the same directory fails with [`StoreError::Locked`].
/// Writes go through a temp file and rename, so readers never observe a
/// partial value.
pub struct FileStorage {
    path: PathBuf,

    /// Held for the lifetime of the storage; releases the lock on drop.
    _lock_file: File,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory and acquire its lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path.join(LOCK_FILE))?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
        })
    }

    /// Map a key to its file path. Characters that are unsafe in file names
    /// are replaced, so namespaced keys like `loop::wrong-questions` work on
    /// every platform.
    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();
        self.path.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key);
        let tmp = target.with_extension("json.tmp");

        let mut file = File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &target)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
