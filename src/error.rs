//! Error types for lockwarden.
//!
//! Uses thiserror for derive macros. A project lock held by another pull
//! request is not an error: it is reported through
//! [`TryLockResponse`](crate::locking::TryLockResponse). Errors are reserved
//! for faults and for the working-directory claim, which callers surface
//! verbatim.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lockwarden operations.
#[derive(Error, Debug)]
pub enum Error {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The lock store could not be read or written.
    #[error("lock store failure: {0}")]
    Store(String),

    /// A working directory is already claimed by another running command.
    #[error("{0}")]
    WorkingDirLocked(String),

    /// No lock exists under the given key.
    #[error("no lock found with id '{0}'")]
    LockNotFound(String),

    /// The VCS client failed to answer.
    #[error("vcs client failure: {0}")]
    Vcs(String),
}

impl Error {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UserError(_) => exit_codes::USER_ERROR,
            Error::LockNotFound(_) => exit_codes::USER_ERROR,
            Error::Vcs(_) => exit_codes::USER_ERROR,
            Error::Store(_) => exit_codes::STORE_FAILURE,
            Error::WorkingDirLocked(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for lockwarden operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_has_correct_exit_code() {
        let err = Error::Store("disk full".to_string());
        assert_eq!(err.exit_code(), exit_codes::STORE_FAILURE);
    }

    #[test]
    fn working_dir_locked_has_lock_exit_code() {
        let err = Error::WorkingDirLocked("busy".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn user_facing_errors_exit_with_user_error() {
        assert_eq!(
            Error::UserError("bad flag".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::LockNotFound("owner/repo/./default".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn working_dir_locked_displays_message_verbatim() {
        let err = Error::WorkingDirLocked("workspace dir is locked".to_string());
        assert_eq!(err.to_string(), "workspace dir is locked");
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = Error::LockNotFound("owner/repo/./default".to_string());
        assert_eq!(err.to_string(), "no lock found with id 'owner/repo/./default'");

        let err = Error::Store("permission denied".to_string());
        assert_eq!(err.to_string(), "lock store failure: permission denied");
    }
}
