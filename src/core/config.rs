//! Configuration file management.
//!
//! Handles reading, writing, and validating `keyfleet.toml`. Every section
//! has defaults, so an absent file is equivalent to an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Process configuration stored in `keyfleet.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key name rules
    pub policy: NamePolicy,
    /// Secret store backend settings
    pub store: StoreConfig,
    /// Device directory backend settings
    pub directory: DirectoryConfig,
    /// Scheduled distribution settings
    pub distribution: DistributionConfig,
}

/// Length bounds for key and device names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamePolicy {
    pub min_name_length: usize,
    pub max_name_length: usize,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            min_name_length: constants::MIN_NAME_LENGTH,
            max_name_length: constants::DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Filesystem secret store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_STORE_PATH),
        }
    }
}

/// JSON device directory location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub path: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_DIRECTORY_PATH),
        }
    }
}

/// Settings for the fan-out run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Store entries never distributed to devices
    pub reserved_names: Vec<String>,
    /// Devices requested per directory page
    pub page_size: usize,
    /// Reported property carrying the device public key
    pub reported_field: String,
    /// Desired property receiving the wrapped bundle
    pub desired_property: String,
    /// Seconds between scheduled runs
    pub interval_secs: u64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            reserved_names: constants::DEFAULT_RESERVED_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            page_size: constants::DEFAULT_PAGE_SIZE,
            reported_field: constants::DEFAULT_REPORTED_FIELD.to_string(),
            desired_property: constants::DEFAULT_DESIRED_PROPERTY.to_string(),
            interval_secs: constants::DEFAULT_INTERVAL_SECS,
        }
    }
}

impl DistributionConfig {
    /// Whether `name` is infrastructure configuration rather than a payload.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|r| r == name)
    }

    /// Interval between scheduled runs.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Default configuration file path in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load and validate configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if a setting is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        debug!(
            reserved = config.distribution.reserved_names.len(),
            page_size = config.distribution.page_size,
            "config loaded"
        );
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// An explicitly requested path must exist.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write this configuration to `path`, refusing to overwrite.
    pub fn write_new(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate setting ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let policy = &self.policy;
        if policy.min_name_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "policy.min_name_length",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if policy.max_name_length < policy.min_name_length
            || policy.max_name_length > constants::MAX_NAME_LENGTH_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                field: "policy.max_name_length",
                reason: format!(
                    "must be between {} and {}",
                    policy.min_name_length,
                    constants::MAX_NAME_LENGTH_LIMIT
                ),
            }
            .into());
        }

        let dist = &self.distribution;
        if dist.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "distribution.page_size",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if dist.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "distribution.interval_secs",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if dist.reported_field.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "distribution.reported_field",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if dist.desired_property.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "distribution.desired_property",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
