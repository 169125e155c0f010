//! Project command runners.
//!
//! [`ProjectCommandRunner`] is the seam to whatever actually runs plan,
//! policy check and apply for one project. [`LockingProjectCommandRunner`]
//! wraps such a runner with lockwarden's two kinds of lock:
//!
//! - plan and policy check take the project lock first, and the lock
//!   outlives the command
//! - apply reuses the lock taken by plan and only claims the working
//!   directory for as long as the apply runs

mod locking;


pub use locking::LockingProjectCommandRunner;

use crate::models::{ProjectCommandContext, ProjectResult};

/// Runs project commands.
pub trait ProjectCommandRunner: Send + Sync {
    fn plan(&self, ctx: &ProjectCommandContext) -> ProjectResult;

    fn policy_check(&self, ctx: &ProjectCommandContext) -> ProjectResult;

    fn apply(&self, ctx: &ProjectCommandContext) -> ProjectResult;
}
