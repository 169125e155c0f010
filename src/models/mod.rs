//! Domain models shared by the locking layers and command runners.
//!
//! - [`Repo`], [`PullRequest`], [`User`] identify who asked for what
//! - [`Project`] and [`ProjectLock`] are the persisted lock vocabulary
//! - [`ProjectCommandContext`] and [`ProjectResult`] are the inputs and
//!   outputs of a single project command

mod command;
mod project;


pub use command::{
    CommandName, PlanSuccess, PolicyCheckSuccess, ProjectCommandContext, ProjectResult,
};
pub use project::{
    Project, ProjectLock, PullRequest, PullRequestState, Repo, User, clean_path,
};
