//! Locking client: the lock API the rest of lockwarden talks to.

use super::store::Backend;
use super::{TryLockResponse, project_lock_key};
use crate::error::Result;
use crate::models::{Project, ProjectLock, PullRequest, User};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Acquire, inspect, and release project locks.
pub trait Locker: Send + Sync {
    /// Try to lock `project` in `workspace` for `pull`.
    ///
    /// Refusal is not an error; it is reported through
    /// [`TryLockResponse::lock_acquired`].
    fn try_lock(
        &self,
        project: &Project,
        workspace: &str,
        pull: &PullRequest,
        user: &User,
    ) -> Result<TryLockResponse>;

    /// Delete the lock with id `key`, returning it if it existed.
    fn unlock(&self, key: &str) -> Result<Option<ProjectLock>>;

    /// Delete every lock held by a pull request, e.g. when it is closed.
    fn unlock_by_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<Vec<ProjectLock>>;

    /// All current locks keyed by lock id.
    fn list(&self) -> Result<BTreeMap<String, ProjectLock>>;

    /// The lock with id `key`, if any.
    fn get_lock(&self, key: &str) -> Result<Option<ProjectLock>>;
}

/// [`Locker`] over a persistent [`Backend`].
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend>,
}

impl Client {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

impl Locker for Client {
    fn try_lock(
        &self,
        project: &Project,
        workspace: &str,
        pull: &PullRequest,
        user: &User,
    ) -> Result<TryLockResponse> {
        let lock = ProjectLock {
            project: project.clone(),
            workspace: workspace.to_string(),
            pull: pull.clone(),
            user: user.clone(),
            time: Utc::now(),
        };
        let key = lock.key();

        let (acquired, current) = self.backend.try_lock(lock)?;
        if acquired {
            Ok(TryLockResponse::acquired(key))
        } else {
            Ok(TryLockResponse::denied(current))
        }
    }

    fn unlock(&self, key: &str) -> Result<Option<ProjectLock>> {
        let removed = self.backend.unlock(key)?;
        if removed.is_some() {
            info!(lock_id = key, "deleted lock");
        }
        Ok(removed)
    }

    fn unlock_by_pull(&self, repo_full_name: &str, pull_num: u64) -> Result<Vec<ProjectLock>> {
        let removed = self.backend.unlock_by_pull(repo_full_name, pull_num)?;
        if !removed.is_empty() {
            info!(
                repo = repo_full_name,
                pull = pull_num,
                count = removed.len(),
                "deleted locks held by pull request"
            );
        }
        Ok(removed)
    }

    fn list(&self) -> Result<BTreeMap<String, ProjectLock>> {
        Ok(self
            .backend
            .list()?
            .into_iter()
            .map(|lock| (lock.key(), lock))
            .collect())
    }

    fn get_lock(&self, key: &str) -> Result<Option<ProjectLock>> {
        self.backend.get_lock(key)
    }
}

/// [`Locker`] used when repository locking is disabled.
///
/// Every attempt is granted and nothing is recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLocker;

impl Locker for NoOpLocker {
    fn try_lock(
        &self,
        project: &Project,
        workspace: &str,
        _pull: &PullRequest,
        _user: &User,
    ) -> Result<TryLockResponse> {
        Ok(TryLockResponse::acquired(project_lock_key(project, workspace)))
    }

    fn unlock(&self, _key: &str) -> Result<Option<ProjectLock>> {
        Ok(None)
    }

    fn unlock_by_pull(&self, _repo_full_name: &str, _pull_num: u64) -> Result<Vec<ProjectLock>> {
        Ok(Vec::new())
    }

    fn list(&self) -> Result<BTreeMap<String, ProjectLock>> {
        Ok(BTreeMap::new())
    }

    fn get_lock(&self, _key: &str) -> Result<Option<ProjectLock>> {
        Ok(None)
    }
}
