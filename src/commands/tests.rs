//! Tests for the lock subcommands.

use super::lock::{
    age_string, cmd_lock_delete, cmd_lock_delete_pull, cmd_lock_list, cmd_lock_show,
};
use crate::cli::{LockDeleteArgs, LockDeletePullArgs, LockIdArgs};
use crate::error::Error;
use crate::locking::{Client, Locker, MemoryBackend};
use crate::models::{Project, PullRequest, Repo, User};
use chrono::{Duration, Utc};
use std::sync::Arc;

fn locker_with_locks() -> Client {
    let client = Client::new(Arc::new(MemoryBackend::new()));
    let pull = |num| PullRequest {
        num,
        url: format!("https://github.com/owner/repo/pull/{}", num),
        base_repo: Repo::new("owner/repo"),
        ..PullRequest::default()
    };
    client
        .try_lock(&Project::new("owner/repo", "."), "default", &pull(1), &User::new("alice"))
        .unwrap();
    client
        .try_lock(&Project::new("owner/repo", "modules/vpc"), "staging", &pull(1), &User::new("alice"))
        .unwrap();
    client
        .try_lock(&Project::new("owner/repo", "apps"), "default", &pull(2), &User::new("bob"))
        .unwrap();
    client
}

#[test]
fn test_age_string() {
    let now = Utc::now();

    assert_eq!(age_string(now, now), "0m");
    assert_eq!(age_string(now - Duration::minutes(42), now), "42m");
    assert_eq!(age_string(now - Duration::minutes(125), now), "2h 5m");
    assert_eq!(age_string(now - Duration::hours(28), now), "1d 4h");
    // Clock skew never renders a negative age.
    assert_eq!(age_string(now + Duration::minutes(5), now), "0m");
}

#[test]
fn test_lock_list_empty() {
    let client = Client::new(Arc::new(MemoryBackend::new()));

    let out = cmd_lock_list(&client, Utc::now()).unwrap();

    assert_eq!(out, "No active locks.\n");
}

#[test]
fn test_lock_list_renders_every_lock() {
    let client = locker_with_locks();

    let out = cmd_lock_list(&client, Utc::now()).unwrap();

    assert!(out.starts_with("Active locks (3):"));
    assert!(out.contains("owner/repo/./default:"));
    assert!(out.contains("owner/repo/modules/vpc/staging:"));
    assert!(out.contains("owner/repo/apps/default:"));
    assert!(out.contains("User:       bob"));
    assert!(out.contains("URL:        https://github.com/owner/repo/pull/2"));
}

#[test]
fn test_lock_show() {
    let client = locker_with_locks();
    let args = LockIdArgs {
        lock_id: "owner/repo/apps/default".to_string(),
    };

    let out = cmd_lock_show(&client, &args, Utc::now()).unwrap();

    assert!(out.contains("Pull:       #2"));
    assert!(out.contains("Path:       apps"));
    assert!(out.contains("Workspace:  default"));
}

#[test]
fn test_lock_show_unknown_id() {
    let client = locker_with_locks();
    let args = LockIdArgs {
        lock_id: "owner/repo/missing/default".to_string(),
    };

    let err = cmd_lock_show(&client, &args, Utc::now()).unwrap_err();

    assert!(matches!(err, Error::LockNotFound(_)));
    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
}

#[test]
fn test_lock_delete_requires_force() {
    let client = locker_with_locks();
    let args = LockDeleteArgs {
        lock_id: "owner/repo/apps/default".to_string(),
        force: false,
    };

    let err = cmd_lock_delete(&client, &args).unwrap_err();

    assert!(err.to_string().contains("--force"));
    assert!(client.get_lock("owner/repo/apps/default").unwrap().is_some());
}

#[test]
fn test_lock_delete() {
    let client = locker_with_locks();
    let args = LockDeleteArgs {
        lock_id: "owner/repo/apps/default".to_string(),
        force: true,
    };

    let out = cmd_lock_delete(&client, &args).unwrap();

    assert_eq!(
        out,
        "Deleted lock 'owner/repo/apps/default' held by pull #2 (bob).\n"
    );
    assert!(client.get_lock("owner/repo/apps/default").unwrap().is_none());
    assert_eq!(client.list().unwrap().len(), 2);
}

#[test]
fn test_lock_delete_unknown_id() {
    let client = locker_with_locks();
    let args = LockDeleteArgs {
        lock_id: "nope".to_string(),
        force: true,
    };

    let err = cmd_lock_delete(&client, &args).unwrap_err();

    assert_eq!(err.to_string(), "no lock found with id 'nope'");
}

#[test]
fn test_lock_delete_pull() {
    let client = locker_with_locks();
    let args = LockDeletePullArgs {
        repo: "owner/repo".to_string(),
        pull: 1,
    };

    let out = cmd_lock_delete_pull(&client, &args).unwrap();

    assert!(out.starts_with("Deleted 2 lock(s) held by owner/repo pull #1:"));
    assert!(out.contains("  owner/repo/./default\n"));
    assert!(out.contains("  owner/repo/modules/vpc/staging\n"));
    let remaining = client.list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains_key("owner/repo/apps/default"));
}

#[test]
fn test_lock_delete_pull_without_locks() {
    let client = locker_with_locks();
    let args = LockDeletePullArgs {
        repo: "owner/other".to_string(),
        pull: 1,
    };

    let out = cmd_lock_delete_pull(&client, &args).unwrap();

    assert_eq!(out, "No locks held by owner/other pull #1.\n");
    assert_eq!(client.list().unwrap().len(), 3);
}

#[test]
fn test_lock_show_renders_exact_block() {
    let client = Client::new(Arc::new(MemoryBackend::new()));
    let pull = PullRequest {
        num: 9,
        base_repo: Repo::new("owner/repo"),
        ..PullRequest::default()
    };
    client
        .try_lock(&Project::new("owner/repo", "infra"), "prod", &pull, &User::new("carol"))
        .unwrap();
    let lock = client.get_lock("owner/repo/infra/prod").unwrap().unwrap();
    let args = LockIdArgs {
        lock_id: "owner/repo/infra/prod".to_string(),
    };

    let out = cmd_lock_show(&client, &args, lock.time + Duration::minutes(90)).unwrap();

    let expected = format!(
        "  owner/repo/infra/prod:\n    Repo:       owner/repo\n    Path:       infra\n    Workspace:  prod\n    Pull:       #9\n    User:       carol\n    Locked:     {}\n    Age:        1h 30m\n",
        lock.time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    assert_eq!(out, expected);
}
