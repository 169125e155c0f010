//! Config constants and serde default functions.

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "lockwarden.yaml";

// Default value functions for serde
pub(crate) fn default_data_dir() -> String {
    ".lockwarden".to_string()
}
pub(crate) fn default_base_url() -> String {
    "http://localhost:4141".to_string()
}
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
