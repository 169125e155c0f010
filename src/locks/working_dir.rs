//! In-memory working-directory claims.

use super::guard::UnlockGuard;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Hands out exclusive claims over checked-out working directories.
///
/// A claim is refused immediately when it is already held; callers are
/// never queued.
pub trait WorkingDirLocker: Send + Sync {
    /// Claim the checkout of `workspace` for a pull request.
    fn try_lock(&self, repo_full_name: &str, pull_num: u64, workspace: &str)
    -> Result<UnlockGuard>;

    /// Claim every workspace of a pull request at once.
    fn try_lock_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<UnlockGuard>;
}

/// [`WorkingDirLocker`] backed by a set of held keys.
///
/// Build one per process and share it; cloning shares the same claim set.
#[derive(Debug, Clone, Default)]
pub struct DefaultWorkingDirLocker {
    locks: Arc<Mutex<HashSet<String>>>,
}

impl DefaultWorkingDirLocker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of claims currently held.
    pub fn held(&self) -> usize {
        self.claims().len()
    }

    // The set is only touched by single insert/remove/scan calls, so a
    // poisoned mutex still guards a consistent set.
    fn claims(&self) -> MutexGuard<'_, HashSet<String>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release_fn(&self, key: String) -> impl FnOnce() + Send + 'static {
        let locks = Arc::clone(&self.locks);
        move || {
            locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
            debug!(key = %key, "released working dir claim");
        }
    }
}

fn pull_key(repo_full_name: &str, pull_num: u64) -> String {
    format!("{}/{}", repo_full_name, pull_num)
}

fn workspace_key(repo_full_name: &str, pull_num: u64, workspace: &str) -> String {
    format!("{}/{}/{}", repo_full_name, pull_num, workspace)
}

impl WorkingDirLocker for DefaultWorkingDirLocker {
    fn try_lock(
        &self,
        repo_full_name: &str,
        pull_num: u64,
        workspace: &str,
    ) -> Result<UnlockGuard> {
        let pull_key = pull_key(repo_full_name, pull_num);
        let key = workspace_key(repo_full_name, pull_num, workspace);

        let mut claims = self.claims();
        if claims.contains(&pull_key) || claims.contains(&key) {
            return Err(Error::WorkingDirLocked(format!(
                "the {} workspace is currently locked by another command that is running for this pull request.\n\
                 Wait until the previous command is complete and try again.",
                workspace
            )));
        }
        claims.insert(key.clone());
        drop(claims);

        debug!(key = %key, "acquired working dir claim");
        Ok(UnlockGuard::new(self.release_fn(key)))
    }

    fn try_lock_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<UnlockGuard> {
        let pull_key = pull_key(repo_full_name, pull_num);
        let workspace_prefix = format!("{}/", pull_key);

        let mut claims = self.claims();
        if claims
            .iter()
            .any(|held| held == &pull_key || held.starts_with(&workspace_prefix))
        {
            return Err(Error::WorkingDirLocked(
                "the pull request is currently locked by another command that is running for it.\n\
                 Wait until the previous command is complete and try again."
                    .to_string(),
            ));
        }
        claims.insert(pull_key.clone());
        drop(claims);

        debug!(key = %pull_key, "acquired working dir claim for whole pull request");
        Ok(UnlockGuard::new(self.release_fn(pull_key)))
    }
}
