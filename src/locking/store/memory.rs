//! Process-local lock store.

use super::{Backend, LockTable};
use crate::error::Result;
use crate::models::ProjectLock;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`Backend`] that keeps locks in memory.
///
/// Nothing survives the process; used for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    table: Mutex<LockTable>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the table cannot leave it half-updated: every
    // operation is a single map call.
    fn table(&self) -> MutexGuard<'_, LockTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for MemoryBackend {
    fn try_lock(&self, lock: ProjectLock) -> Result<(bool, ProjectLock)> {
        Ok(self.table().try_lock(lock))
    }

    fn unlock(&self, key: &str) -> Result<Option<ProjectLock>> {
        Ok(self.table().unlock(key))
    }

    fn unlock_by_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<Vec<ProjectLock>> {
        Ok(self.table().unlock_by_pull(repo_full_name, pull_num))
    }

    fn list(&self) -> Result<Vec<ProjectLock>> {
        Ok(self.table().list())
    }

    fn get_lock(&self, key: &str) -> Result<Option<ProjectLock>> {
        Ok(self.table().get(key))
    }
}
