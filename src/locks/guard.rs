//! RAII unlock guard.

use std::fmt;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Releases a claim exactly once: on [`release`](Self::release) or on drop.
#[must_use = "dropping the guard releases the claim immediately"]
pub struct UnlockGuard {
    release: Option<ReleaseFn>,
}

impl UnlockGuard {
    /// Create a guard that runs `release` when the claim ends.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release the claim now instead of at the end of the scope.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for UnlockGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for UnlockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockGuard")
            .field("held", &self.release.is_some())
            .finish()
    }
}
