//! JSON file lock store.
//!
//! Locks live in `{data_dir}/locks.json`. A transaction holds, in order:
//! 1. the backend's in-process mutex
//! 2. an `fs2` advisory lock on `{data_dir}/locks.json.lock` (exclusive for
//!    writes, shared for reads)
//!
//! then reads the whole table, applies the operation, and writes the table
//! back with [`atomic_write`] only if it changed. A failed write leaves the
//! previous table in place.

use super::{Backend, LOCK_TABLE_VERSION, LockTable};
use crate::error::{Error, Result};
use crate::fs::atomic_write;
use crate::models::ProjectLock;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Name of the lock database inside the data directory.
pub const LOCKS_FILE: &str = "locks.json";

/// Name of the advisory lock file guarding [`LOCKS_FILE`].
pub const LOCKS_GUARD_FILE: &str = "locks.json.lock";

/// A [`Backend`] persisted as a JSON file in a data directory.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    guard_path: PathBuf,
    txn: Mutex<()>,
}

/// Held advisory lock on the guard file; unlocked on drop.
struct FileGuard {
    file: File,
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl FileBackend {
    /// Open (creating if needed) the store in `data_dir`.
    ///
    /// An existing database is read once so that corruption is reported at
    /// startup rather than on the first lock attempt.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(|e| {
            Error::Store(format!(
                "failed to create data directory '{}': {}",
                data_dir.display(),
                e
            ))
        })?;

        let backend = Self {
            path: data_dir.join(LOCKS_FILE),
            guard_path: data_dir.join(LOCKS_GUARD_FILE),
            txn: Mutex::new(()),
        };
        let count = backend.view(|table| table.locks.len())?;
        debug!(path = %backend.path.display(), locks = count, "opened lock store");

        Ok(backend)
    }

    /// Path of the lock database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self, exclusive: bool) -> Result<FileGuard> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.guard_path)
            .map_err(|e| {
                Error::Store(format!(
                    "failed to open '{}': {}",
                    self.guard_path.display(),
                    e
                ))
            })?;

        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| {
            Error::Store(format!(
                "failed to lock '{}': {}",
                self.guard_path.display(),
                e
            ))
        })?;

        Ok(FileGuard { file })
    }

    fn load(&self) -> Result<LockTable> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LockTable::default()),
            Err(e) => {
                return Err(Error::Store(format!(
                    "failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(LockTable::default());
        }

        let table: LockTable = serde_json::from_str(&content).map_err(|e| {
            Error::Store(format!("failed to parse '{}': {}", self.path.display(), e))
        })?;

        if table.version != LOCK_TABLE_VERSION {
            return Err(Error::Store(format!(
                "'{}' has unsupported version {} (expected {})",
                self.path.display(),
                table.version,
                LOCK_TABLE_VERSION
            )));
        }

        Ok(table)
    }

    fn persist(&self, table: &LockTable) -> Result<()> {
        let json = serde_json::to_string_pretty(table)
            .map_err(|e| Error::Store(format!("failed to serialize locks: {}", e)))?;
        atomic_write(&self.path, json.as_bytes())
    }

    /// Run a read-only transaction.
    fn view<R>(&self, op: impl FnOnce(&LockTable) -> R) -> Result<R> {
        let _txn = self.txn.lock().unwrap_or_else(PoisonError::into_inner);
        let _guard = self.guard(false)?;
        let table = self.load()?;
        Ok(op(&table))
    }

    /// Run a read-modify-write transaction.
    fn update<R>(&self, op: impl FnOnce(&mut LockTable) -> R) -> Result<R> {
        let _txn = self.txn.lock().unwrap_or_else(PoisonError::into_inner);
        let _guard = self.guard(true)?;
        let before = self.load()?;
        let mut table = before.clone();
        let result = op(&mut table);
        if table != before {
            self.persist(&table)?;
            debug!(path = %self.path.display(), locks = table.locks.len(), "wrote lock store");
        }
        Ok(result)
    }
}

impl Backend for FileBackend {
    fn try_lock(&self, lock: ProjectLock) -> Result<(bool, ProjectLock)> {
        self.update(|table| table.try_lock(lock))
    }

    fn unlock(&self, key: &str) -> Result<Option<ProjectLock>> {
        self.update(|table| table.unlock(key))
    }

    fn unlock_by_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<Vec<ProjectLock>> {
        self.update(|table| table.unlock_by_pull(repo_full_name, pull_num))
    }

    fn list(&self) -> Result<Vec<ProjectLock>> {
        self.view(LockTable::list)
    }

    fn get_lock(&self, key: &str) -> Result<Option<ProjectLock>> {
        self.view(|table| table.get(key))
    }
}
