//! Config loading, validation, and wiring of the configured components.

use super::model::Config;
use crate::error::{Error, Result};
use crate::lock_url::DefaultLockUrlGenerator;
use crate::locking::{Client, FileBackend, Locker, NoOpLocker};
use crate::vcs::HostedVcsClient;
use std::path::Path;
use std::sync::Arc;
use url::Url;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `path` if given, else the default file if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(super::DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| Error::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `data_dir` must be non-empty
    /// - `base_url` must be an absolute URL
    /// - `log_level` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(Error::UserError(
                "config validation failed: data_dir must be non-empty".to_string(),
            ));
        }

        self.parsed_base_url()?;

        if self.log_level.trim().is_empty() {
            return Err(Error::UserError(
                "config validation failed: log_level must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            Error::UserError(format!(
                "config validation failed: base_url '{}' is not a valid URL: {}",
                self.base_url, e
            ))
        })
    }

    /// The project lock store this config selects.
    pub fn build_locker(&self) -> Result<Arc<dyn Locker>> {
        if self.disable_repo_locking {
            return Ok(Arc::new(NoOpLocker));
        }
        let backend = FileBackend::open(&self.data_dir)?;
        Ok(Arc::new(Client::new(Arc::new(backend))))
    }

    pub fn lock_url_generator(&self) -> Result<DefaultLockUrlGenerator> {
        Ok(DefaultLockUrlGenerator::new(self.parsed_base_url()?))
    }

    pub fn vcs_client(&self) -> HostedVcsClient {
        HostedVcsClient::new(self.vcs_host)
    }
}
