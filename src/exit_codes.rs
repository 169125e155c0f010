//! Exit code constants for the lockwarden CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unknown lock)
//! - 2: Lock store failure (I/O or corrupt lock data)
//! - 3: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or unknown lock id.
pub const USER_ERROR: i32 = 1;

/// Lock store failure: the lock database could not be read or written.
pub const STORE_FAILURE: i32 = 2;

/// Lock acquisition failure: a working directory or project is already locked.
pub const LOCK_FAILURE: i32 = 3;
