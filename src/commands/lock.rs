//! `lockwarden lock` subcommands.
//!
//! Each command renders its output to a string so the formatting can be
//! tested without capturing stdout.

use crate::cli::{LockAction, LockCommand, LockDeleteArgs, LockDeletePullArgs, LockIdArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::locking::Locker;
use crate::models::ProjectLock;
use chrono::{DateTime, Utc};

/// Dispatch lock subcommands.
pub(super) fn dispatch_lock(config: &Config, lock_cmd: LockCommand) -> Result<()> {
    let locker = config.build_locker()?;
    let output = match lock_cmd.action {
        LockAction::List => cmd_lock_list(locker.as_ref(), Utc::now())?,
        LockAction::Show(args) => cmd_lock_show(locker.as_ref(), &args, Utc::now())?,
        LockAction::Delete(args) => cmd_lock_delete(locker.as_ref(), &args)?,
        LockAction::DeletePull(args) => cmd_lock_delete_pull(locker.as_ref(), &args)?,
    };
    print!("{}", output);
    Ok(())
}

pub(super) fn cmd_lock_list(locker: &dyn Locker, now: DateTime<Utc>) -> Result<String> {
    let locks = locker.list()?;

    if locks.is_empty() {
        return Ok("No active locks.\n".to_string());
    }

    let mut out = format!("Active locks ({}):\n\n", locks.len());
    for (key, lock) in &locks {
        out.push_str(&render_lock(key, lock, now));
        out.push('\n');
    }
    Ok(out)
}

pub(super) fn cmd_lock_show(
    locker: &dyn Locker,
    args: &LockIdArgs,
    now: DateTime<Utc>,
) -> Result<String> {
    let lock = locker
        .get_lock(&args.lock_id)?
        .ok_or_else(|| Error::LockNotFound(args.lock_id.clone()))?;

    Ok(render_lock(&args.lock_id, &lock, now))
}

pub(super) fn cmd_lock_delete(locker: &dyn Locker, args: &LockDeleteArgs) -> Result<String> {
    if !args.force {
        return Err(Error::UserError(format!(
            "refusing to delete lock without --force flag.\n\n\
             Deleting a lock discards the owning pull request's plan lock; \
             it will have to plan again before it can apply.\n\n\
             To delete the lock, run:\n  lockwarden lock delete {} --force",
            args.lock_id
        )));
    }

    let lock = locker
        .unlock(&args.lock_id)?
        .ok_or_else(|| Error::LockNotFound(args.lock_id.clone()))?;

    Ok(format!(
        "Deleted lock '{}' held by pull #{} ({}).\n",
        args.lock_id, lock.pull.num, lock.user.username
    ))
}

pub(super) fn cmd_lock_delete_pull(
    locker: &dyn Locker,
    args: &LockDeletePullArgs,
) -> Result<String> {
    let removed = locker.unlock_by_pull(&args.repo, args.pull)?;

    if removed.is_empty() {
        return Ok(format!(
            "No locks held by {} pull #{}.\n",
            args.repo, args.pull
        ));
    }

    let mut out = format!(
        "Deleted {} lock(s) held by {} pull #{}:\n",
        removed.len(),
        args.repo,
        args.pull
    );
    for lock in &removed {
        out.push_str(&format!("  {}\n", lock.key()));
    }
    Ok(out)
}

fn render_lock(key: &str, lock: &ProjectLock, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("  {}:", key),
        format!("    Repo:       {}", lock.project.repo_full_name),
        format!("    Path:       {}", lock.project.path),
        format!("    Workspace:  {}", lock.workspace),
        format!("    Pull:       #{}", lock.pull.num),
    ];
    if !lock.pull.url.is_empty() {
        lines.push(format!("    URL:        {}", lock.pull.url));
    }
    lines.push(format!("    User:       {}", lock.user.username));
    lines.push(format!(
        "    Locked:     {}",
        lock.time.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("    Age:        {}", age_string(lock.time, now)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Human-readable age, e.g. `3m`, `2h 5m`, `1d 4h`.
pub(super) fn age_string(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(time);
    let minutes = age.num_minutes().max(0);
    let hours = age.num_hours().max(0);
    let days = age.num_days().max(0);

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}
