//! Config loading, validation, and discovery.

use super::model::{CONFIG_FILE_NAME, Config};
use crate::error::{Result, SemaphoreError};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SemaphoreError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SemaphoreError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `dir/filesem.yaml` if it exists, defaults otherwise.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SemaphoreError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SemaphoreError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `root` must be non-empty
    /// - `lease_seconds` must be positive; a zero lease never excludes anyone
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(SemaphoreError::Config(
                "config validation failed: root must not be empty".to_string(),
            ));
        }

        if self.lease_seconds == 0 {
            return Err(SemaphoreError::Config(
                "config validation failed: lease_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
