//! CLI argument parsing for lockwarden.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lockwarden: project locks for pull-request driven plan/apply pipelines.
///
/// Inspects and releases the project locks plans hold until they are applied.
#[derive(Parser, Debug)]
#[command(name = "lockwarden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ./lockwarden.yaml if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockwarden.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project lock management commands.
    ///
    /// List, inspect, or delete the locks held by unapplied plans.
    Lock(LockCommand),
}

/// Lock subcommands.
#[derive(Parser, Debug)]
pub struct LockCommand {
    #[command(subcommand)]
    pub action: LockAction,
}

/// Available lock actions.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// List all held project locks.
    ///
    /// Shows each lock with the pull request and user holding it and its age.
    List,

    /// Show a single lock.
    Show(LockIdArgs),

    /// Delete a single lock.
    ///
    /// Requires --force since the owning pull request's plan becomes unappliable.
    Delete(LockDeleteArgs),

    /// Delete every lock held by a pull request.
    DeletePull(LockDeletePullArgs),
}

/// Arguments for commands addressing one lock.
#[derive(Parser, Debug)]
pub struct LockIdArgs {
    /// Lock id, as `{repo}/{path}/{workspace}`.
    pub lock_id: String,
}

/// Arguments for the `lock delete` command.
#[derive(Parser, Debug)]
pub struct LockDeleteArgs {
    /// Lock id, as `{repo}/{path}/{workspace}`.
    pub lock_id: String,

    /// Force deleting the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `lock delete-pull` command.
#[derive(Parser, Debug)]
pub struct LockDeletePullArgs {
    /// Full name of the repository the pull request targets.
    #[arg(long)]
    pub repo: String,

    /// Pull request number.
    #[arg(long)]
    pub pull: u64,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_lock_list() {
        let cli = Cli::try_parse_from(["lockwarden", "lock", "list"]).unwrap();
        assert!(cli.config.is_none());
        let Command::Lock(lock_cmd) = cli.command;
        assert!(matches!(lock_cmd.action, LockAction::List));
    }

    #[test]
    fn parse_config_before_and_after_subcommand() {
        let cli =
            Cli::try_parse_from(["lockwarden", "--config", "ci.yaml", "lock", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));

        let cli =
            Cli::try_parse_from(["lockwarden", "lock", "list", "--config", "ci.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
    }

    #[test]
    fn parse_lock_show() {
        let cli =
            Cli::try_parse_from(["lockwarden", "lock", "show", "owner/repo/./default"]).unwrap();
        let Command::Lock(lock_cmd) = cli.command;
        if let LockAction::Show(args) = lock_cmd.action {
            assert_eq!(args.lock_id, "owner/repo/./default");
        } else {
            panic!("Expected Show action");
        }
    }

    #[test]
    fn parse_lock_delete_force() {
        let cli = Cli::try_parse_from([
            "lockwarden",
            "lock",
            "delete",
            "owner/repo/./default",
            "--force",
        ])
        .unwrap();
        let Command::Lock(lock_cmd) = cli.command;
        if let LockAction::Delete(args) = lock_cmd.action {
            assert_eq!(args.lock_id, "owner/repo/./default");
            assert!(args.force);
        } else {
            panic!("Expected Delete action");
        }
    }

    #[test]
    fn parse_lock_delete_pull() {
        let cli = Cli::try_parse_from([
            "lockwarden",
            "lock",
            "delete-pull",
            "--repo",
            "owner/repo",
            "--pull",
            "42",
        ])
        .unwrap();
        let Command::Lock(lock_cmd) = cli.command;
        if let LockAction::DeletePull(args) = lock_cmd.action {
            assert_eq!(args.repo, "owner/repo");
            assert_eq!(args.pull, 42);
        } else {
            panic!("Expected DeletePull action");
        }
    }

    #[test]
    fn parse_lock_delete_pull_requires_number() {
        let result = Cli::try_parse_from([
            "lockwarden",
            "lock",
            "delete-pull",
            "--repo",
            "owner/repo",
            "--pull",
            "abc",
        ]);
        assert!(result.is_err());
    }
}
