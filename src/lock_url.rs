//! Lock URL generation.

use url::Url;

/// Turns a lock id into a URL where a human can view or delete the lock.
pub trait LockUrlGenerator: Send + Sync {
    fn generate_lock_url(&self, lock_id: &str) -> String;
}

/// Generates `{base_url}/lock?id={lock_id}` with the id query-encoded.
#[derive(Debug, Clone)]
pub struct DefaultLockUrlGenerator {
    base_url: Url,
}

impl DefaultLockUrlGenerator {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}

impl LockUrlGenerator for DefaultLockUrlGenerator {
    fn generate_lock_url(&self, lock_id: &str) -> String {
        let mut url = self.base_url.clone();
        {
            // Bases such as `mailto:` cannot carry a path.
            let Ok(mut segments) = url.path_segments_mut() else {
                return lock_id.to_string();
            };
            segments.pop_if_empty().push("lock");
        }
        url.query_pairs_mut().clear().append_pair("id", lock_id);
        url.to_string()
    }
}
