//! Command implementations for lockwarden.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod lock;

#[cfg(test)]
mod tests;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Lock(lock_cmd) => lock::dispatch_lock(config, lock_cmd),
    }
}
