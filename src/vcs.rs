//! VCS client seam.
//!
//! lockwarden only needs one thing from the VCS host: a way to refer to a
//! pull request in a comment.

use crate::error::Result;
use crate::models::PullRequest;
use serde::{Deserialize, Serialize};

/// The part of a VCS API client lockwarden depends on.
pub trait VcsClient: Send + Sync {
    /// Markdown that links to `pull` when rendered in a comment on the host.
    fn markdown_pull_link(&self, pull: &PullRequest) -> Result<String>;
}

/// Supported VCS hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VcsHost {
    #[default]
    Github,
    Gitlab,
    Bitbucket,
    AzureDevops,
}

impl VcsHost {
    /// Prefix the host auto-links pull request numbers with.
    pub fn pull_prefix(&self) -> &'static str {
        match self {
            VcsHost::Github | VcsHost::Bitbucket => "#",
            VcsHost::Gitlab | VcsHost::AzureDevops => "!",
        }
    }
}

/// [`VcsClient`] that relies on the host auto-linking `#N` / `!N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostedVcsClient {
    host: VcsHost,
}

impl HostedVcsClient {
    pub fn new(host: VcsHost) -> Self {
        Self { host }
    }
}

impl VcsClient for HostedVcsClient {
    fn markdown_pull_link(&self, pull: &PullRequest) -> Result<String> {
        Ok(format!("{}{}", self.host.pull_prefix(), pull.num))
    }
}
