//! Runner that sequences project locks and working-directory claims.

use super::ProjectCommandRunner;
use crate::lock_url::LockUrlGenerator;
use crate::locking::TryLockResponse;
use crate::locks::{ProjectLocker, WorkingDirLocker, lock_failure_message};
use crate::models::{CommandName, Project, ProjectCommandContext, ProjectResult};
use std::sync::Arc;
use tracing::warn;

/// [`ProjectCommandRunner`] that only delegates once the right locks are held.
#[derive(Clone)]
pub struct LockingProjectCommandRunner {
    runner: Arc<dyn ProjectCommandRunner>,
    locker: Arc<dyn ProjectLocker>,
    lock_url_generator: Arc<dyn LockUrlGenerator>,
    working_dir_locker: Arc<dyn WorkingDirLocker>,
}

impl LockingProjectCommandRunner {
    pub fn new(
        runner: Arc<dyn ProjectCommandRunner>,
        locker: Arc<dyn ProjectLocker>,
        lock_url_generator: Arc<dyn LockUrlGenerator>,
        working_dir_locker: Arc<dyn WorkingDirLocker>,
    ) -> Self {
        Self {
            runner,
            locker,
            lock_url_generator,
            working_dir_locker,
        }
    }

    /// Take the project lock, then run `run` and point its success payload
    /// at the lock.
    fn run_with_project_lock(
        &self,
        ctx: &ProjectCommandContext,
        command: CommandName,
        run: impl FnOnce(&ProjectCommandContext) -> ProjectResult,
    ) -> ProjectResult {
        let project = Project::new(ctx.pull.base_repo.full_name.clone(), &ctx.repo_rel_dir);

        let attempt = match self
            .locker
            .try_lock(&ctx.log, &ctx.pull, &ctx.user, &ctx.workspace, &project)
        {
            Ok(attempt) => attempt,
            Err(e) => {
                ctx.log.in_scope(|| warn!(error = %e, "failed to acquire project lock"));
                return ctx.result(command).with_error(e);
            }
        };

        if !attempt.lock_acquired {
            return ctx.result(command).with_failure(denial_reason(attempt));
        }

        let mut result = run(ctx);
        // Lockers that record nothing may grant without a key.
        let Some(lock_key) = attempt.lock_key else {
            return result;
        };
        let lock_url = self.lock_url_generator.generate_lock_url(&lock_key);
        if let Some(success) = result.plan_success.as_mut() {
            success.lock_url = lock_url.clone();
        }
        if let Some(success) = result.policy_check_success.as_mut() {
            success.lock_url = lock_url;
        }
        result
    }
}

/// The message shown for a refused lock; never empty.
fn denial_reason(attempt: TryLockResponse) -> String {
    match (attempt.lock_failure_reason, attempt.current_lock) {
        (Some(reason), _) if !reason.is_empty() => reason,
        (_, Some(current)) => lock_failure_message(&format!("#{}", current.pull.num)),
        _ => "This project is currently locked by another pull request.".to_string(),
    }
}

impl ProjectCommandRunner for LockingProjectCommandRunner {
    fn plan(&self, ctx: &ProjectCommandContext) -> ProjectResult {
        self.run_with_project_lock(ctx, CommandName::Plan, |ctx| self.runner.plan(ctx))
    }

    fn policy_check(&self, ctx: &ProjectCommandContext) -> ProjectResult {
        self.run_with_project_lock(ctx, CommandName::PolicyCheck, |ctx| {
            self.runner.policy_check(ctx)
        })
    }

    fn apply(&self, ctx: &ProjectCommandContext) -> ProjectResult {
        let _claim = match self.working_dir_locker.try_lock(
            &ctx.pull.base_repo.full_name,
            ctx.pull.num,
            &ctx.workspace,
        ) {
            Ok(guard) => guard,
            Err(e) => return ctx.result(CommandName::Apply).with_error(e),
        };

        self.runner.apply(ctx)
    }
}
