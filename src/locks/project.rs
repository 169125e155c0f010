//! Project lock decisions and conflict messages.

use crate::error::Result;
use crate::locking::{Locker, TryLockResponse};
use crate::models::{Project, PullRequest, User};
use crate::vcs::VcsClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Decides whether a pull request may lock a project and explains refusals.
pub trait ProjectLocker: Send + Sync {
    /// Try to lock `project` in `workspace` for `pull`.
    ///
    /// A refusal comes back with `lock_failure_reason` set to a message
    /// that can be posted on the pull request as is.
    fn try_lock(
        &self,
        log: &tracing::Span,
        pull: &PullRequest,
        user: &User,
        workspace: &str,
        project: &Project,
    ) -> Result<TryLockResponse>;
}

/// Message posted when a project is locked by another pull request.
///
/// `blocking_pull` is how the owning pull request is rendered, usually a
/// markdown link.
pub fn lock_failure_message(blocking_pull: &str) -> String {
    format!(
        "This project is currently locked by an unapplied plan from pull {0}. \
         To continue, delete the lock from {0} or apply that plan and merge the pull request.\n\n\
         Once the lock is released, comment `atlantis plan` here to re-plan.",
        blocking_pull
    )
}

/// [`ProjectLocker`] over a [`Locker`] and a [`VcsClient`].
#[derive(Clone)]
pub struct DefaultProjectLocker {
    locker: Arc<dyn Locker>,
    vcs_client: Arc<dyn VcsClient>,
}

impl DefaultProjectLocker {
    pub fn new(locker: Arc<dyn Locker>, vcs_client: Arc<dyn VcsClient>) -> Self {
        Self { locker, vcs_client }
    }

    /// How the pull request owning a lock is named in the failure message.
    fn describe_pull(&self, pull: &PullRequest) -> String {
        match self.vcs_client.markdown_pull_link(pull) {
            Ok(link) => link,
            Err(e) => {
                warn!(pull = pull.num, error = %e, "failed to build pull request link");
                format!("#{}", pull.num)
            }
        }
    }
}

impl ProjectLocker for DefaultProjectLocker {
    fn try_lock(
        &self,
        log: &tracing::Span,
        pull: &PullRequest,
        user: &User,
        workspace: &str,
        project: &Project,
    ) -> Result<TryLockResponse> {
        let _entered = log.enter();

        let mut response = self.locker.try_lock(project, workspace, pull, user)?;
        if let Some(current) = &response.current_lock {
            let blocking_pull = self.describe_pull(&current.pull);
            info!(
                owner_pull = current.pull.num,
                "project is locked by another pull request"
            );
            response.lock_failure_reason = Some(lock_failure_message(&blocking_pull));
            return Ok(response);
        }

        if let Some(key) = &response.lock_key {
            info!(lock_id = %key, "acquired lock");
        }
        Ok(response)
    }
}
