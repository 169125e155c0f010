//! Project and working-directory locks for lockwarden.
//!
//! Two independent kinds of lock guard a project command:
//!
//! - **Project locks** (`{repo}/{path}/{workspace}`) are persisted through
//!   the [`locking`](crate::locking) store and give one pull request
//!   exclusive planning rights until the lock is deleted or the pull request
//!   closes. [`ProjectLocker`] decides and explains them.
//! - **Working-directory claims** (`{repo}/{pull}/{workspace}`) live in
//!   memory for the duration of one command and stop two commands from
//!   touching the same checkout at once. [`WorkingDirLocker`] hands them out.
//!
//! # RAII Guards
//!
//! Working-directory claims are released by an [`UnlockGuard`] when it is
//! dropped, so early returns and panics release them too.

mod guard;
mod project;
mod working_dir;


pub use guard::UnlockGuard;
pub use project::{DefaultProjectLocker, ProjectLocker, lock_failure_message};
pub use working_dir::{DefaultWorkingDirLocker, WorkingDirLocker};
