//! Lockwarden: project and working-directory locking for pull-request
//! driven plan/apply pipelines.
//!
//! A plan takes a persistent lock on its (repo, path, workspace) until the
//! owning pull request applies it or is closed, so two pull requests never
//! plan the same project concurrently. Applies additionally claim the
//! on-disk working directory for the duration of the command.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod lock_url;
pub mod locking;
pub mod locks;
pub mod logging;
pub mod models;
pub mod runners;
pub mod vcs;
