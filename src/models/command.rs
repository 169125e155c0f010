//! Project command context and result models.

use super::project::{PullRequest, User};
use crate::error::Error;
use std::fmt;

/// The project commands that pass through the locking runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Plan,
    PolicyCheck,
    Apply,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Plan => "plan",
            CommandName::PolicyCheck => "policy_check",
            CommandName::Apply => "apply",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a runner needs to execute one command against one project.
#[derive(Debug, Clone)]
pub struct ProjectCommandContext {
    /// Span that log events for this command are recorded under.
    pub log: tracing::Span,

    /// Pull request the command was issued on.
    pub pull: PullRequest,

    /// User that issued the command.
    pub user: User,

    /// Workspace to run in.
    pub workspace: String,

    /// Project directory relative to the repository root.
    pub repo_rel_dir: String,

    /// Configured project name, empty when unnamed.
    pub project_name: String,
}

impl ProjectCommandContext {
    /// Build a context that logs under a fresh span for this project.
    pub fn new(
        pull: PullRequest,
        user: User,
        workspace: impl Into<String>,
        repo_rel_dir: impl Into<String>,
    ) -> Self {
        let workspace = workspace.into();
        let repo_rel_dir = repo_rel_dir.into();
        let log = tracing::info_span!(
            "project",
            repo = %pull.base_repo.full_name,
            pull = pull.num,
            dir = %repo_rel_dir,
            workspace = %workspace,
        );
        Self {
            log,
            pull,
            user,
            workspace,
            repo_rel_dir,
            project_name: String::new(),
        }
    }

    pub fn with_project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = project_name.into();
        self
    }

    /// An empty result for `command` echoing this context's routing fields.
    pub fn result(&self, command: CommandName) -> ProjectResult {
        ProjectResult {
            command,
            repo_rel_dir: self.repo_rel_dir.clone(),
            workspace: self.workspace.clone(),
            project_name: self.project_name.clone(),
            plan_success: None,
            policy_check_success: None,
            apply_success: None,
            failure: None,
            error: None,
        }
    }
}

/// Output of a successful plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSuccess {
    pub terraform_output: String,

    /// Where the project lock created for this plan can be viewed or deleted.
    pub lock_url: String,

    /// Comment that re-runs this plan.
    pub re_plan_cmd: String,

    /// Comment that applies this plan.
    pub apply_cmd: String,
}

/// Output of a successful policy check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyCheckSuccess {
    pub policy_check_output: String,
    pub lock_url: String,
    pub re_plan_cmd: String,
    pub apply_cmd: String,
}

/// Result of running one command against one project.
///
/// At most one of the success payloads, `failure`, and `error` is expected
/// to be populated. `failure` is an expected, user-facing refusal (e.g. the
/// project is locked); `error` is a fault.
#[derive(Debug)]
pub struct ProjectResult {
    pub command: CommandName,
    pub repo_rel_dir: String,
    pub workspace: String,
    pub project_name: String,
    pub plan_success: Option<PlanSuccess>,
    pub policy_check_success: Option<PolicyCheckSuccess>,
    pub apply_success: Option<String>,
    pub failure: Option<String>,
    pub error: Option<Error>,
}

impl ProjectResult {
    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    pub fn with_error(mut self, error: Error) -> Self {
        self.error = Some(error);
        self
    }

    /// True when the command neither failed nor errored.
    pub fn is_successful(&self) -> bool {
        self.failure.is_none() && self.error.is_none()
    }
}
