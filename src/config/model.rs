//! Config struct definition and default implementation.

use super::types::*;
use crate::vcs::VcsHost;
use serde::{Deserialize, Serialize};

/// Configuration for a lockwarden deployment.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Store settings
    // =========================================================================
    /// Directory holding the lock table (default: ".lockwarden").
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Grant every project lock without recording it.
    #[serde(default)]
    pub disable_repo_locking: bool,

    // =========================================================================
    // Comment settings
    // =========================================================================
    /// Public URL lock links are generated under.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Host that renders pull request links in comments.
    #[serde(default)]
    pub vcs_host: VcsHost,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            disable_repo_locking: false,
            base_url: default_base_url(),
            vcs_host: VcsHost::default(),
            log_level: default_log_level(),
        }
    }
}
