//! Project locking for lockwarden.
//!
//! A project lock gives one pull request exclusive planning rights over a
//! project+workspace. Locks are persisted through a [`Backend`] so they
//! survive restarts, and live until they are deleted explicitly or the owning
//! pull request is closed.
//!
//! # Keys
//!
//! Each lock is stored under `{repo_full_name}/{path}/{workspace}`, so a
//! project+workspace pair has at most one live lock.
//!
//! # Ownership
//!
//! A try-lock by the pull request that already owns the key is granted and
//! replaces the stored record. Any other pull request is refused and shown
//! the current owner.

mod client;
pub mod store;

#[cfg(test)]
mod tests;

pub use client::{Client, Locker, NoOpLocker};
pub use store::{Backend, FileBackend, MemoryBackend};

use crate::models::{Project, ProjectLock};

/// Outcome of a project lock attempt.
///
/// `lock_key` is set iff the lock was acquired. `current_lock` is set iff it
/// was refused, and holds the record of the pull request that owns it.
/// `lock_failure_reason` is filled in by callers that explain refusals to
/// users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TryLockResponse {
    pub lock_acquired: bool,
    pub lock_key: Option<String>,
    pub current_lock: Option<ProjectLock>,
    pub lock_failure_reason: Option<String>,
}

impl TryLockResponse {
    /// A granted attempt.
    pub fn acquired(lock_key: impl Into<String>) -> Self {
        Self {
            lock_acquired: true,
            lock_key: Some(lock_key.into()),
            ..Self::default()
        }
    }

    /// A refused attempt, blocked by `current_lock`.
    pub fn denied(current_lock: ProjectLock) -> Self {
        Self {
            lock_acquired: false,
            current_lock: Some(current_lock),
            ..Self::default()
        }
    }
}

/// Store key for a project+workspace.
///
/// The key is not injective when repository names nest, as GitLab subgroups
/// do: `g/sub/proj` at `mod` and `g/sub` at `proj/mod` share the key
/// `g/sub/proj/mod/{workspace}`, so one can block the other. Changing the
/// format would orphan existing lock tables.
pub fn project_lock_key(project: &Project, workspace: &str) -> String {
    format!("{}/{}/{}", project.repo_full_name, project.path, workspace)
}
