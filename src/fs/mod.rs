//! Filesystem utilities for lockwarden.
//!
//! Atomic replacement of the lock database file, so a crash mid-write
//! never leaves a truncated table behind.

pub mod atomic;

pub use atomic::atomic_write;
