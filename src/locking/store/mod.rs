//! Persistent lock store.
//!
//! [`Backend`] is the narrow seam between the locking client and whatever
//! holds the records. Every method is one atomic transaction: a
//! [`LockTable`] is read, changed, and written back while the backend's
//! exclusion is held.

mod file;
mod memory;


pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;
use crate::models::ProjectLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable key/value store of project locks.
pub trait Backend: Send + Sync {
    /// Acquire the lock described by `lock`, atomically.
    ///
    /// Returns `(true, lock)` when the key was free or already owned by the
    /// same pull request (the stored record is replaced), and
    /// `(false, current)` with the untouched existing record otherwise.
    fn try_lock(&self, lock: ProjectLock) -> Result<(bool, ProjectLock)>;

    /// Delete the lock stored under `key`, returning it if it existed.
    fn unlock(&self, key: &str) -> Result<Option<ProjectLock>>;

    /// Delete every lock owned by the given pull request.
    fn unlock_by_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<Vec<ProjectLock>>;

    /// All current locks, ordered by key.
    fn list(&self) -> Result<Vec<ProjectLock>>;

    /// The lock stored under `key`, if any.
    fn get_lock(&self, key: &str) -> Result<Option<ProjectLock>>;
}

/// Current on-disk layout of [`LockTable`].
pub const LOCK_TABLE_VERSION: u32 = 1;

/// In-memory image of the store: key to lock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTable {
    pub version: u32,
    #[serde(default)]
    pub locks: BTreeMap<String, ProjectLock>,
}

impl Default for LockTable {
    fn default() -> Self {
        Self {
            version: LOCK_TABLE_VERSION,
            locks: BTreeMap::new(),
        }
    }
}

impl LockTable {
    /// Grant `lock` unless its key is owned by a different pull request.
    pub fn try_lock(&mut self, lock: ProjectLock) -> (bool, ProjectLock) {
        let key = lock.key();
        match self.locks.get(&key) {
            Some(current) if !current.pull.same_pull(&lock.pull) => (false, current.clone()),
            _ => {
                self.locks.insert(key, lock.clone());
                (true, lock)
            }
        }
    }

    pub fn unlock(&mut self, key: &str) -> Option<ProjectLock> {
        self.locks.remove(key)
    }

    pub fn unlock_by_pull(&mut self, repo_full_name: &str, pull_num: u64) -> Vec<ProjectLock> {
        let keys: Vec<String> = self
            .locks
            .iter()
            .filter(|(_, lock)| {
                lock.pull.num == pull_num && lock.pull.base_repo.full_name == repo_full_name
            })
            .map(|(key, _)| key.clone())
            .collect();

        keys.iter().filter_map(|key| self.locks.remove(key)).collect()
    }

    pub fn list(&self) -> Vec<ProjectLock> {
        self.locks.values().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<ProjectLock> {
        self.locks.get(key).cloned()
    }
}
