//! Repository, pull request, and project lock models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A VCS repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Repo {
    /// Owner and name joined with a slash (e.g. `runatlantis/infra`).
    pub full_name: String,

    /// Owner part of the full name.
    pub owner: String,

    /// Name part of the full name.
    pub name: String,
}

impl Repo {
    /// Build a repo from its full name, splitting owner and name on the last `/`.
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let (owner, name) = match full_name.rsplit_once('/') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (String::new(), full_name.clone()),
        };
        Self {
            full_name,
            owner,
            name,
        }
    }
}

/// Whether a pull request is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    #[default]
    Open,
    Closed,
}

/// A pull request whose comments trigger project commands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number, unique within the base repo.
    pub num: u64,

    /// SHA of the head commit.
    #[serde(default)]
    pub head_commit: String,

    /// Web URL of the pull request.
    #[serde(default)]
    pub url: String,

    /// Branch being merged.
    #[serde(default)]
    pub head_branch: String,

    /// Branch being merged into.
    #[serde(default)]
    pub base_branch: String,

    /// Username of the pull request author.
    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub state: PullRequestState,

    /// Repository the pull request is merging into.
    pub base_repo: Repo,
}

impl PullRequest {
    /// Whether `other` is the same pull request (same base repo and number).
    ///
    /// Ownership of a project lock is decided on this identity only; head
    /// commit, branches and state may change between plans.
    pub fn same_pull(&self, other: &PullRequest) -> bool {
        self.num == other.num && self.base_repo.full_name == other.base_repo.full_name
    }
}

/// The user that triggered a command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A directory inside a repository that is planned and applied as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// Full name of the repository the project lives in.
    pub repo_full_name: String,

    /// Cleaned path of the project relative to the repository root.
    /// The repository root itself is `.`.
    pub path: String,
}

impl Project {
    /// Build a project, cleaning the path so that equivalent spellings map
    /// to the same lock key.
    pub fn new(repo_full_name: impl Into<String>, path: &str) -> Self {
        let mut path = clean_path(path);
        if path == "/" {
            path = ".".to_string();
        }
        Self {
            repo_full_name: repo_full_name.into(),
            path,
        }
    }
}

/// Lexically clean a slash-separated path.
///
/// Repeated separators and `.` elements are dropped, `..` consumes the
/// preceding element, and an empty result becomes `.`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// A persisted project lock.
///
/// Grants one pull request exclusive planning rights over a
/// project+workspace until it is deleted or the pull request closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLock {
    pub project: Project,

    /// Workspace the lock applies to (e.g. `default`).
    pub workspace: String,

    /// Pull request that owns the lock.
    pub pull: PullRequest,

    /// User whose command created the lock.
    pub user: User,

    /// When the lock was (re)acquired.
    pub time: DateTime<Utc>,
}

impl ProjectLock {
    /// The store key of this lock.
    pub fn key(&self) -> String {
        crate::locking::project_lock_key(&self.project, &self.workspace)
    }
}
