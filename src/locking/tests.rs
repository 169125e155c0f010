//! Tests for the locking client and no-op locker.

use super::*;
use crate::models::{PullRequest, Repo, User};
use std::sync::Arc;

fn pull(num: u64) -> PullRequest {
    PullRequest {
        num,
        base_repo: Repo::new("owner/repo"),
        ..PullRequest::default()
    }
}

fn client() -> Client {
    Client::new(Arc::new(MemoryBackend::new()))
}

#[test]
fn test_project_lock_key_format() {
    let project = Project::new("owner/repo", "./modules/vpc/");
    assert_eq!(project_lock_key(&project, "staging"), "owner/repo/modules/vpc/staging");
}

#[test]
fn test_project_lock_key_collides_for_nested_repo_names() {
    let subgroup_repo = Project::new("g/sub/proj", "mod");
    let parent_repo = Project::new("g/sub", "proj/mod");

    assert_eq!(
        project_lock_key(&subgroup_repo, "default"),
        project_lock_key(&parent_repo, "default")
    );
}

#[test]
fn test_try_lock_returns_key_when_acquired() {
    let client = client();
    let project = Project::new("owner/repo", ".");

    let response = client.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();

    assert!(response.lock_acquired);
    assert_eq!(response.lock_key.as_deref(), Some("owner/repo/./default"));
    assert!(response.current_lock.is_none());
    assert!(response.lock_failure_reason.is_none());
}

#[test]
fn test_try_lock_returns_current_owner_when_denied() {
    let client = client();
    let project = Project::new("owner/repo", ".");
    client.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();

    let response = client.try_lock(&project, "default", &pull(2), &User::new("bob")).unwrap();

    assert!(!response.lock_acquired);
    assert!(response.lock_key.is_none());
    let current = response.current_lock.unwrap();
    assert_eq!(current.pull.num, 1);
    assert_eq!(current.user.username, "alice");
}

#[test]
fn test_try_lock_twice_by_same_pull_succeeds() {
    let client = client();
    let project = Project::new("owner/repo", ".");

    let first = client.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();
    let second = client.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();

    assert!(first.lock_acquired);
    assert!(second.lock_acquired);
    assert_eq!(client.list().unwrap().len(), 1);
}

#[test]
fn test_list_is_keyed_by_lock_id() {
    let client = client();
    client
        .try_lock(&Project::new("owner/repo", "a"), "default", &pull(1), &User::new("alice"))
        .unwrap();

    let locks = client.list().unwrap();

    assert_eq!(locks.keys().collect::<Vec<_>>(), vec!["owner/repo/a/default"]);
}

#[test]
fn test_unlock_and_get_lock() {
    let client = client();
    let project = Project::new("owner/repo", ".");
    client.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();

    assert!(client.get_lock("owner/repo/./default").unwrap().is_some());
    let removed = client.unlock("owner/repo/./default").unwrap().unwrap();
    assert_eq!(removed.pull.num, 1);
    assert!(client.get_lock("owner/repo/./default").unwrap().is_none());
}

#[test]
fn test_unlock_by_pull_releases_all_projects_of_pull() {
    let client = client();
    let user = User::new("alice");
    client.try_lock(&Project::new("owner/repo", "a"), "default", &pull(1), &user).unwrap();
    client.try_lock(&Project::new("owner/repo", "b"), "default", &pull(1), &user).unwrap();

    let removed = client.unlock_by_pull("owner/repo", 1).unwrap();

    assert_eq!(removed.len(), 2);
    assert!(client.list().unwrap().is_empty());
}

#[test]
fn test_noop_locker_always_grants() {
    let locker = NoOpLocker;
    let project = Project::new("owner/repo", ".");

    let first = locker.try_lock(&project, "default", &pull(1), &User::new("alice")).unwrap();
    let second = locker.try_lock(&project, "default", &pull(2), &User::new("bob")).unwrap();

    assert!(first.lock_acquired);
    assert!(second.lock_acquired);
    assert_eq!(second.lock_key.as_deref(), Some("owner/repo/./default"));
    assert!(locker.list().unwrap().is_empty());
    assert!(locker.unlock("owner/repo/./default").unwrap().is_none());
}
